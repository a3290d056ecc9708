//! Implementation of the `cyclesmith create` command.
//!
//! Responsibility: translate CLI arguments and configuration into a
//! `CycleRequest`, call the core cycle service, and display the report.
//! No generation logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use cyclesmith_adapters::{LocalFilesystem, SchemaFieldSource};
use cyclesmith_core::{
    application::services::{AuxOutcome, RegistryOutcome, StepReport, WrittenFile},
    prelude::*,
};

use crate::{
    cli::{CreateArgs, global::GlobalArgs},
    config::{AppConfig, TEMPLATE_ROOT_ENV},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `cyclesmith create` command.
///
/// Dispatch sequence:
/// 1. Resolve the package directory and template root
/// 2. Merge flags over configuration into a `CycleRequest`
/// 3. Early-exit with the resolved plan if `--dry-run`
/// 4. Run the cycle service and render its report
/// 5. Fail with [`CliError::StepsFailed`] if any step failed
#[instrument(skip_all, fields(cycle = %args.name))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve locations
    let workdir = resolve_workdir(args.directory.as_deref())?;
    let assets = match args
        .template_root
        .clone()
        .or_else(|| config.assets.template_root.clone())
    {
        Some(root) => AssetConfig::new(root),
        None => {
            warn!("No template root configured, job configuration outputs will be skipped");
            output.warning(&format!(
                "No template root set (--template-root or ${TEMPLATE_ROOT_ENV}); \
                 the job configuration and its DTD will be skipped"
            ))?;
            AssetConfig::new(PathBuf::new())
        }
    };
    debug!(
        workdir = %workdir.display(),
        template_root = %assets.template_root().display(),
        "Locations resolved"
    );

    // 2. Build request
    let request = build_request(&args, &config, workdir);

    let service = CycleService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(
            SchemaFieldSource::new(LocalFilesystem::new())
                .with_default_tree(config.generation.default_tree.clone()),
        ),
        assets,
    );

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        let plan = service.plan(&request)?;
        if output.is_json() {
            output.json(&plan)?;
        } else {
            show_plan(&plan, &output)?;
        }
        return Ok(());
    }

    // 4. Generate
    info!(workdir = %request.workdir.display(), "Cycle creation started");
    let report = service.create(&request)?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        show_report(&report, &output, global.verbose > 0)?;
    }

    // Written outputs stay in place; the exit code tells scripts what is missing.
    if report.has_failures() {
        return Err(CliError::StepsFailed {
            cycle: report.cycle.clone(),
            failed: report.failures().map(|s| s.step.to_string()).collect(),
        });
    }
    Ok(())
}

// ── Request construction ──────────────────────────────────────────────────────

fn resolve_workdir(directory: Option<&Path>) -> CliResult<PathBuf> {
    let dir = directory.unwrap_or_else(|| Path::new("."));
    // Canonical, so the package directory has a name to derive the analysis from.
    dir.canonicalize().map_err(|source| CliError::InvalidDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

fn build_request(args: &CreateArgs, config: &AppConfig, workdir: PathBuf) -> CycleRequest {
    let mut request = CycleRequest::new(args.name.clone(), workdir);
    request.analysis = args.analysis.clone();
    request.registry = args.registry.clone();
    request.data_file = args.data_file.clone();
    request.tree_name = args.tree.clone();
    request.default_tree = config.generation.default_tree.clone();
    request.selection = args.selection.clone();
    request.output_tree = args.out_tree.clone();
    request.mc_tags = args
        .mc_tags
        .clone()
        .unwrap_or_else(|| config.generation.mc_tags.clone());
    request.helper_functions = config.generation.helper_functions && !args.inline;
    request
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn show_plan(plan: &CyclePlan, output: &OutputManager) -> CliResult<()> {
    let opts = &plan.options;
    output.info(&format!(
        "Dry run: would create cycle '{}'",
        opts.names.full_name()
    ))?;
    output.print(&format!("  Analysis:      {}", opts.analysis))?;
    output.print(&format!("  Data type:     {}", opts.data_type))?;
    output.print(&format!("  Input file:    {}", opts.input_file))?;
    output.print(&format!("  Input tree:    {}", opts.input_tree))?;
    output.print(&format!(
        "  Output tree:   {}",
        opts.output_tree.as_deref().unwrap_or("(none)")
    ))?;
    output.print(&format!(
        "  Helpers:       {}",
        if opts.helper_functions { "yes" } else { "no" }
    ))?;
    output.print(&format!("  Header:        {}", opts.header_path.display()))?;
    output.print(&format!("  Source:        {}", opts.source_path.display()))?;
    output.print(&format!("  LinkDef:       {}", opts.registry_path.display()))?;
    output.print(&format!("  Job config:    {}", opts.config_path.display()))?;
    output.print(&format!("  DTD directory: {}", opts.config_dir.display()))?;

    output.print(&format!("  Fields ({}):", opts.fields.len()))?;
    for field in &opts.fields {
        let mut line = format!("    {} {}", field.typename(), field.name());
        if field.is_mc() {
            line.push_str("  [MC]");
        }
        if field.is_commented() {
            line.push_str("  [commented]");
        }
        output.print(&line)?;
    }

    for warning in &plan.warnings {
        output.warning(warning)?;
    }
    Ok(())
}

fn show_report(report: &CycleReport, output: &OutputManager, verbose: bool) -> CliResult<()> {
    output.header(&format!(
        "Cycle '{}' in analysis '{}' ({} fields, {})",
        report.cycle, report.analysis, report.field_count, report.data_type
    ))?;

    for warning in &report.warnings {
        output.warning(warning)?;
    }
    for step in &report.steps {
        show_step(step, output, verbose)?;
    }

    if report.has_failures() {
        output.warning("Some outputs were skipped, see above")?;
    } else {
        output.success(&format!("Cycle '{}' created!", report.cycle))?;
    }
    output.info(report.reminder)?;
    Ok(())
}

fn show_step(step: &StepReport, output: &OutputManager, verbose: bool) -> CliResult<()> {
    let name = step.step;
    match &step.outcome {
        StepOutcome::Written(file) => {
            output.success(&format!("{name}: wrote {}", file.path.display()))?;
            show_backup(file, output)?;
        }
        StepOutcome::Registry(outcome) => show_registry(name, outcome, output, verbose)?,
        StepOutcome::Aux(AuxOutcome::Copied { from, to }) => {
            output.success(&format!(
                "{name}: copied {} to {}",
                from.display(),
                to.display()
            ))?;
        }
        StepOutcome::Aux(AuxOutcome::Kept { path }) => {
            output.info(&format!("{name}: keeping existing {}", path.display()))?;
        }
        StepOutcome::Failed { error, suggestions } => {
            output.warning(&format!("{name}: skipped, {error}"))?;
            for suggestion in suggestions {
                output.print(&format!("    {suggestion}"))?;
            }
        }
    }
    Ok(())
}

fn show_registry(
    name: Step,
    outcome: &RegistryOutcome,
    output: &OutputManager,
    verbose: bool,
) -> CliResult<()> {
    let (verb, file, lines) = match outcome {
        RegistryOutcome::Unchanged { path } => {
            output.info(&format!("{name}: {} already up to date", path.display()))?;
            return Ok(());
        }
        RegistryOutcome::Created { file, lines } => ("created", file, lines),
        RegistryOutcome::Extended { file, lines } => ("extended", file, lines),
    };

    output.success(&format!(
        "{name}: {verb} {} ({} lines)",
        file.path.display(),
        lines.len()
    ))?;
    if verbose {
        for line in lines {
            output.print(&format!("    {line}"))?;
        }
    }
    show_backup(file, output)
}

fn show_backup(file: &WrittenFile, output: &OutputManager) -> CliResult<()> {
    if let Some(backup) = &file.backup {
        output.info(&format!(
            "  previous version moved to {}",
            backup.display()
        ))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use tempfile::TempDir;

    fn create_args(argv: &[&str]) -> CreateArgs {
        let mut full = vec!["cyclesmith", "create"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Create(args) => args,
            _ => panic!("expected Create command"),
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.generation.mc_tags = "sim_".into();
        config.generation.default_tree = "events".into();

        let args = create_args(&["MyCycle", "--mc-tags", "truth", "--inline"]);
        let request = build_request(&args, &config, PathBuf::from("/pkg"));
        assert_eq!(request.mc_tags, "truth");
        assert_eq!(request.default_tree, "events");
        assert!(!request.helper_functions);
    }

    #[test]
    fn config_supplies_defaults() {
        let mut config = AppConfig::default();
        config.generation.helper_functions = false;

        let args = create_args(&["Ana::MyCycle", "--out-tree", "Out"]);
        let request = build_request(&args, &config, PathBuf::from("/pkg"));
        assert_eq!(request.cycle_name, "Ana::MyCycle");
        assert_eq!(request.mc_tags, "mc_,truth");
        assert_eq!(request.output_tree.as_deref(), Some("Out"));
        assert!(!request.helper_functions);
    }

    #[test]
    fn workdir_is_canonical() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("Ana");
        std::fs::create_dir(&nested).unwrap();

        let resolved = resolve_workdir(Some(&nested.join("..").join("Ana"))).unwrap();
        assert_eq!(resolved.file_name().unwrap(), "Ana");
        assert!(resolved.is_absolute());
    }

    #[test]
    fn missing_workdir_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = resolve_workdir(Some(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, CliError::InvalidDirectory { .. }));
    }
}
