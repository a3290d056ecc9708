//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the resolved
//! [`cyclesmith_core::domain::AssetConfig`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`SFRAME_DIR`, `.env` loaded by `main`)
//! 3. Config file (`--config`, the platform config dir, then `./.cyclesmith.toml`)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use cyclesmith_core::domain::{options::DEFAULT_TREE_NAME, tagging::DEFAULT_MC_TAGS};

/// Environment variable pointing at the framework installation.
pub const TEMPLATE_ROOT_ENV: &str = "SFRAME_DIR";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".cyclesmith.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the framework's template assets live.
    pub assets: AssetsConfig,
    /// Defaults for `create`.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,

    /// File the values were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub template_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub mc_tags: String,
    pub helper_functions: bool,
    pub default_tree: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mc_tags: DEFAULT_MC_TAGS.into(),
            helper_functions: true,
            default_tree: DEFAULT_TREE_NAME.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the first config file found, then
    /// the environment.
    ///
    /// An explicitly requested file must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                if !path.is_file() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::from_file(path)?
            }
            None => match Self::candidates().into_iter().find(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("Invalid configuration file")
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config =
            Self::from_toml(&text).with_context(|| format!("While loading {}", path.display()))?;
        debug!(file = %path.display(), "Loaded configuration");
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Overlay environment values read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(TEMPLATE_ROOT_ENV).filter(|v| !v.is_empty()) {
            self.assets.template_root = Some(PathBuf::from(root));
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cyclesmith.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "cyclesmith", "cyclesmith")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    fn candidates() -> Vec<PathBuf> {
        vec![Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)]
    }

    /// Look up a dotted key, e.g. `generation.mc_tags`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "assets.template_root" => self
                .assets
                .template_root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "generation.mc_tags" => self.generation.mc_tags.clone(),
            "generation.helper_functions" => self.generation.helper_functions.to_string(),
            "generation.default_tree" => self.generation.default_tree.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }
}
