//! Cycle Service - main application orchestrator.
//!
//! This service coordinates one cycle creation:
//! 1. Resolve names, input tree, fields and Monte-Carlo tags
//! 2. Work out where every file goes
//! 3. Run the emitters in order and record what each one did
//!
//! Only a conflicting analysis name stops the run; every other failure is
//! local to its step and shows up in the report.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{FieldSource, Filesystem},
        services::{
            aux_copier::AuxCopier,
            config_emitter::ConfigEmitter,
            header_emitter::HeaderEmitter,
            name_resolver::NameResolver,
            registry_emitter::RegistryEmitter,
            report::{CycleReport, FORMATTER_REMINDER, Step, StepOutcome, StepReport},
            source_emitter::SourceEmitter,
        },
    },
    domain::{
        AssetConfig, DomainValidator, GenerationOptions, McTagger, NamePair,
        ProjectLayout,
        options::{DEFAULT_TREE_NAME, PLACEHOLDER_INPUT_FILE},
        tagging::DEFAULT_MC_TAGS,
    },
    error::CycleResult,
};

/// Everything the caller decides about one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleRequest {
    /// Possibly namespaced, e.g. `Ana::ElectronCycle`.
    pub cycle_name: String,
    /// Package directory; relative paths below are anchored here.
    pub workdir: PathBuf,
    pub analysis: Option<String>,
    pub registry: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub tree_name: Option<String>,
    /// Tree used when neither `tree_name` nor a data file is given.
    pub default_tree: String,
    pub selection: Option<PathBuf>,
    pub output_tree: Option<String>,
    pub mc_tags: String,
    pub helper_functions: bool,
}

impl CycleRequest {
    pub fn new(cycle_name: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            cycle_name: cycle_name.into(),
            workdir: workdir.into(),
            analysis: None,
            registry: None,
            data_file: None,
            tree_name: None,
            default_tree: DEFAULT_TREE_NAME.to_string(),
            selection: None,
            output_tree: None,
            mc_tags: DEFAULT_MC_TAGS.to_string(),
            helper_functions: true,
        }
    }

    fn anchored(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }
}

/// Fully resolved generation, before anything is written.
#[derive(Debug, Clone, Serialize)]
pub struct CyclePlan {
    pub options: GenerationOptions,
    pub warnings: Vec<String>,
}

/// Main cycle creation service.
pub struct CycleService {
    filesystem: Box<dyn Filesystem>,
    fields: Box<dyn FieldSource>,
    assets: AssetConfig,
}

impl CycleService {
    /// Create a new cycle service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        fields: Box<dyn FieldSource>,
        assets: AssetConfig,
    ) -> Self {
        Self {
            filesystem,
            fields,
            assets,
        }
    }

    pub fn assets(&self) -> &AssetConfig {
        &self.assets
    }

    /// Resolve every name, field and path without touching any output.
    #[instrument(skip_all, fields(cycle = %request.cycle_name))]
    pub fn plan(&self, request: &CycleRequest) -> CycleResult<CyclePlan> {
        DomainValidator::validate_cycle_name(&request.cycle_name)?;
        let names = NamePair::split(&request.cycle_name);
        let fs = self.filesystem.as_ref();
        let mut warnings = Vec::new();

        let analysis = match &request.analysis {
            Some(name) => name.clone(),
            None => {
                let name = NameResolver::new(fs).resolve(&request.workdir)?;
                info!(analysis = %name, "Using analysis name");
                name
            }
        };

        // The tree name is needed before any field source is asked.
        let data_file = request.data_file.as_deref().map(|p| request.anchored(p));
        let input_tree = match (&request.tree_name, &data_file) {
            (Some(tree), _) => tree.clone(),
            (None, Some(path)) => self.fields.default_tree_name(Some(path))?,
            (None, None) => request.default_tree.clone(),
        };

        let mut fields = match (&request.selection, &data_file) {
            (Some(selection), _) => self.fields.read_selection(&request.anchored(selection))?,
            (None, Some(path)) => self.fields.read_fields(path, &input_tree)?,
            (None, None) => {
                debug!("No selection or data file given, generating without fields");
                Vec::new()
            }
        };

        let (tagger, rejected) = McTagger::compile(&request.mc_tags);
        for err in rejected {
            warn!(error = %err, "Not a valid expression for Monte-Carlo tagging, skipping it");
            warnings.push(err.to_string());
        }
        let data_type = tagger.tag(&mut fields);
        info!(
            fields = fields.len(),
            mc_fields = fields.iter().filter(|f| f.is_mc()).count(),
            data_type = %data_type,
            "Fields resolved"
        );

        let layout = ProjectLayout::detect(&request.workdir, |p| fs.is_dir(p));
        let registry_path = request
            .registry
            .as_deref()
            .map(|p| request.anchored(p))
            .unwrap_or_else(|| layout.registry_path(&analysis));
        let input_file = request
            .data_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| PLACEHOLDER_INPUT_FILE.to_string());
        let output_tree = request.output_tree.clone().filter(|t| !t.is_empty());

        let options = GenerationOptions {
            header_path: layout.header_path(names.class_name()),
            source_path: layout.source_path(names.class_name()),
            config_path: layout.config_path(names.class_name()),
            registry_path,
            config_dir: layout.config_dir(),
            create_output: output_tree.is_some(),
            helper_functions: request.helper_functions,
            names,
            fields,
            analysis,
            input_file,
            input_tree,
            output_tree,
            data_type,
        };

        Ok(CyclePlan { options, warnings })
    }

    /// Create the cycle: header, registry, source, job configuration and DTD.
    #[instrument(skip_all, fields(cycle = %request.cycle_name))]
    pub fn create(&self, request: &CycleRequest) -> CycleResult<CycleReport> {
        let CyclePlan { options, warnings } = self.plan(request)?;
        let fs = self.filesystem.as_ref();
        let mut steps = Vec::with_capacity(5);

        let header = HeaderEmitter::new(fs).emit(&options.header());
        let header_path = header
            .as_ref()
            .map(|w| w.path.clone())
            .unwrap_or_else(|_| options.header_path.clone());
        steps.push(record(Step::Header, header.map(StepOutcome::Written)));

        steps.push(record(
            Step::Registry,
            RegistryEmitter::new(fs)
                .emit(&options.registry())
                .map(StepOutcome::Registry),
        ));
        steps.push(record(
            Step::Source,
            SourceEmitter::new(fs)
                .emit(&options.source(&header_path))
                .map(StepOutcome::Written),
        ));
        steps.push(record(
            Step::Config,
            ConfigEmitter::new(fs, &self.assets)
                .emit(&options.config())
                .map(StepOutcome::Written),
        ));
        steps.push(record(
            Step::AuxFile,
            AuxCopier::new(fs, &self.assets)
                .copy(&options.aux())
                .map(StepOutcome::Aux),
        ));

        info!(reminder = FORMATTER_REMINDER, "Cycle created");
        Ok(CycleReport {
            cycle: options.names.full_name(),
            analysis: options.analysis,
            data_type: options.data_type,
            field_count: options.fields.len(),
            steps,
            warnings,
            reminder: FORMATTER_REMINDER,
        })
    }
}

fn record(step: Step, result: CycleResult<StepOutcome>) -> StepReport {
    let outcome = result.unwrap_or_else(|err| {
        warn!(step = %step, error = %err, "Step failed, nothing written for it");
        StepOutcome::failed(&err)
    });
    StepReport { step, outcome }
}
