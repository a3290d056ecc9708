//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cyclesmith",
    bin_name = "cyclesmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Analysis cycle skeletons for SFrame packages",
    long_about = "cyclesmith writes the header, source, LinkDef entries and job \
                  configuration of a new analysis cycle, filling in the \
                  variables of your input tree.",
    after_help = "EXAMPLES:\n\
        \x20 cyclesmith create MyCycle\n\
        \x20 cyclesmith create Ana::ElectronCycle --data-file data.json --out-tree Electrons\n\
        \x20 cyclesmith create MyCycle --selection vars.txt --dry-run\n\
        \x20 cyclesmith completions bash > /usr/share/bash-completion/completions/cyclesmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new analysis cycle.
    #[command(
        visible_alias = "new",
        about = "Create a new analysis cycle",
        after_help = "EXAMPLES:\n\
            \x20 cyclesmith create MyCycle\n\
            \x20 cyclesmith create Ana::MyCycle --analysis Ana --tree physics\n\
            \x20 cyclesmith create MyCycle --data-file data.json --mc-tags 'mc_,truth'\n\
            \x20 cyclesmith create MyCycle --selection vars.txt --out-tree Out --inline"
    )]
    Create(CreateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cyclesmith completions bash > ~/.local/share/bash-completion/completions/cyclesmith\n\
            \x20 cyclesmith completions zsh  > ~/.zfunc/_cyclesmith\n\
            \x20 cyclesmith completions fish > ~/.config/fish/completions/cyclesmith.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cyclesmith config get assets.template_root\n\
            \x20 cyclesmith config list\n\
            \x20 cyclesmith config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `cyclesmith create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Cycle class name, optionally namespaced (`Ana::MyCycle`).
    #[arg(value_name = "CYCLE", help = "Cycle class name, e.g. MyCycle or Ana::MyCycle")]
    pub name: String,

    /// Package directory to generate into. Relative paths given to the
    /// other options are read from there.
    #[arg(
        short = 'C',
        long = "directory",
        value_name = "DIR",
        help = "Run as if started in DIR (the package directory)"
    )]
    pub directory: Option<PathBuf>,

    /// Analysis (library) name; derived from the package when omitted.
    #[arg(
        short = 'a',
        long = "analysis",
        value_name = "NAME",
        help = "Analysis name (default: derived from the package)"
    )]
    pub analysis: Option<String>,

    /// LinkDef file to extend.
    #[arg(
        short = 'l',
        long = "registry",
        visible_alias = "linkdef",
        value_name = "FILE",
        help = "LinkDef file (default: include/<analysis>_LinkDef.h)"
    )]
    pub registry: Option<PathBuf>,

    /// Data file whose tree variables become cycle fields.
    #[arg(
        short = 'd',
        long = "data-file",
        value_name = "FILE",
        help = "Data file to take the input variables from"
    )]
    pub data_file: Option<PathBuf>,

    /// Input tree name.
    #[arg(
        short = 't',
        long = "tree",
        value_name = "NAME",
        help = "Input tree name (default: first tree of the data file)"
    )]
    pub tree: Option<String>,

    /// Selection file listing the fields to use.
    #[arg(
        short = 's',
        long = "selection",
        value_name = "FILE",
        help = "Field selection file, one '<type> <name>' per line"
    )]
    pub selection: Option<PathBuf>,

    /// Output tree name; enables output variables.
    #[arg(
        short = 'o',
        long = "out-tree",
        value_name = "NAME",
        help = "Output tree name (enables output variables)"
    )]
    pub out_tree: Option<String>,

    /// Comma-separated Monte-Carlo tag patterns.
    #[arg(
        long = "mc-tags",
        value_name = "PATTERNS",
        help = "Comma-separated regular expressions marking MC-only fields"
    )]
    pub mc_tags: Option<String>,

    /// Put per-field code directly into the main functions.
    #[arg(long = "inline", help = "Do not generate helper functions")]
    pub inline: bool,

    /// Framework installation holding the template assets.
    #[arg(
        long = "template-root",
        value_name = "DIR",
        help = "SFrame installation with user/config templates (default: $SFRAME_DIR)"
    )]
    pub template_root: Option<PathBuf>,

    /// Resolve everything and print the plan without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cyclesmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cyclesmith config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.mc_tags`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
