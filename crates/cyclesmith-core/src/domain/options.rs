//! Option records handed to the emitters.
//!
//! [`GenerationOptions`] is the aggregate the orchestrator resolves once; each
//! emitter gets a narrow, borrowed view of it that names exactly what it reads.
//! The per-emitter records can also be built by hand, in which case every
//! path falls back to its conventional default.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{field::FieldModel, naming::NamePair, tagging::DataType};

/// Registry file name used when none is given.
pub const DEFAULT_REGISTRY_FILE: &str = "LinkDef.h";
/// Auxiliary file copied next to the job configuration.
pub const JOB_CONFIG_DTD: &str = "JobConfig.dtd";
/// Example job configuration shipped with the framework.
pub const EXAMPLE_CONFIG: &str = "FirstCycle_config.xml";
/// Analysis name used when nothing better is known.
pub const DEFAULT_ANALYSIS: &str = "MyAnalysis";
/// Input file written into the job configuration when none was given.
pub const PLACEHOLDER_INPUT_FILE: &str = "your/input/file.root";
/// Tree name used when neither an explicit name nor a data file is available.
pub const DEFAULT_TREE_NAME: &str = "CollectionTree";

/// Where template assets live. Resolved once at the process boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetConfig {
    template_root: PathBuf,
}

impl AssetConfig {
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
        }
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    fn config_dir(&self) -> PathBuf {
        self.template_root.join("user").join("config")
    }

    /// Example job configuration the config emitter starts from.
    pub fn example_config(&self) -> PathBuf {
        self.config_dir().join(EXAMPLE_CONFIG)
    }

    /// DTD copied next to generated job configurations.
    pub fn job_config_dtd(&self) -> PathBuf {
        self.config_dir().join(JOB_CONFIG_DTD)
    }
}

/// Everything one cycle generation needs, resolved up front.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub names: NamePair,
    pub fields: Vec<FieldModel>,
    pub create_output: bool,
    pub helper_functions: bool,
    pub header_path: PathBuf,
    pub source_path: PathBuf,
    pub config_path: PathBuf,
    pub registry_path: PathBuf,
    pub config_dir: PathBuf,
    pub analysis: String,
    pub input_file: String,
    pub input_tree: String,
    pub output_tree: Option<String>,
    pub data_type: DataType,
}

impl GenerationOptions {
    pub fn header(&self) -> HeaderOptions<'_> {
        HeaderOptions {
            names: &self.names,
            path: Some(self.header_path.clone()),
            fields: &self.fields,
            create_output: self.create_output,
            helper_functions: self.helper_functions,
        }
    }

    /// Source options; `header_path` is what the header emitter actually wrote.
    pub fn source(&self, header_path: &Path) -> SourceOptions<'_> {
        SourceOptions {
            names: &self.names,
            path: Some(self.source_path.clone()),
            header_path: Some(header_path.to_path_buf()),
            fields: &self.fields,
            create_output: self.create_output,
            helper_functions: self.helper_functions,
        }
    }

    pub fn registry(&self) -> RegistryOptions<'_> {
        RegistryOptions {
            names: &self.names,
            path: Some(self.registry_path.clone()),
            fields: &self.fields,
        }
    }

    pub fn config(&self) -> ConfigOptions<'_> {
        ConfigOptions {
            names: &self.names,
            path: Some(self.config_path.clone()),
            analysis: &self.analysis,
            input_file: &self.input_file,
            input_tree: &self.input_tree,
            output_tree: self.output_tree.as_deref(),
            data_type: self.data_type,
        }
    }

    pub fn aux(&self) -> AuxOptions {
        AuxOptions {
            target_dir: self.config_dir.clone(),
        }
    }
}

/// What the header emitter reads.
#[derive(Debug, Clone)]
pub struct HeaderOptions<'a> {
    pub names: &'a NamePair,
    pub path: Option<PathBuf>,
    pub fields: &'a [FieldModel],
    pub create_output: bool,
    pub helper_functions: bool,
}

impl<'a> HeaderOptions<'a> {
    pub fn new(names: &'a NamePair, fields: &'a [FieldModel]) -> Self {
        Self {
            names,
            path: None,
            fields,
            create_output: false,
            helper_functions: false,
        }
    }

    /// Explicit path, or `<Class>.h`.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| default_header_path(self.names))
    }
}

/// What the source emitter reads.
#[derive(Debug, Clone)]
pub struct SourceOptions<'a> {
    pub names: &'a NamePair,
    pub path: Option<PathBuf>,
    pub header_path: Option<PathBuf>,
    pub fields: &'a [FieldModel],
    pub create_output: bool,
    pub helper_functions: bool,
}

impl<'a> SourceOptions<'a> {
    pub fn new(names: &'a NamePair, fields: &'a [FieldModel]) -> Self {
        Self {
            names,
            path: None,
            header_path: None,
            fields,
            create_output: false,
            helper_functions: false,
        }
    }

    /// Explicit path, or `<Class>.cxx`.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.cxx", self.names.class_name())))
    }

    /// Header to include, or `<Class>.h`.
    pub fn resolved_header_path(&self) -> PathBuf {
        self.header_path
            .clone()
            .unwrap_or_else(|| default_header_path(self.names))
    }
}

/// What the registry emitter reads.
#[derive(Debug, Clone)]
pub struct RegistryOptions<'a> {
    pub names: &'a NamePair,
    pub path: Option<PathBuf>,
    pub fields: &'a [FieldModel],
}

impl<'a> RegistryOptions<'a> {
    pub fn new(names: &'a NamePair, fields: &'a [FieldModel]) -> Self {
        Self {
            names,
            path: None,
            fields,
        }
    }

    /// Explicit path, or `LinkDef.h`.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_FILE))
    }
}

/// What the job configuration emitter reads.
#[derive(Debug, Clone)]
pub struct ConfigOptions<'a> {
    pub names: &'a NamePair,
    pub path: Option<PathBuf>,
    pub analysis: &'a str,
    pub input_file: &'a str,
    pub input_tree: &'a str,
    pub output_tree: Option<&'a str>,
    pub data_type: DataType,
}

impl<'a> ConfigOptions<'a> {
    pub fn new(names: &'a NamePair) -> Self {
        Self {
            names,
            path: None,
            analysis: DEFAULT_ANALYSIS,
            input_file: PLACEHOLDER_INPUT_FILE,
            input_tree: DEFAULT_TREE_NAME,
            output_tree: None,
            data_type: DataType::Data,
        }
    }

    /// Explicit path, or `<Class>_config.xml`.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}_config.xml", self.names.class_name())))
    }

    /// `JobName` attribute of the generated configuration.
    pub fn job_name(&self) -> String {
        format!("{}Job", self.names.class_name())
    }
}

/// What the auxiliary file copier reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxOptions {
    pub target_dir: PathBuf,
}

fn default_header_path(names: &NamePair) -> PathBuf {
    PathBuf::from(format!("{}.h", names.class_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_class_name() {
        let names = NamePair::split("Ana::MyCycle");
        let fields = Vec::new();

        assert_eq!(
            HeaderOptions::new(&names, &fields).resolved_path(),
            PathBuf::from("MyCycle.h")
        );
        let source = SourceOptions::new(&names, &fields);
        assert_eq!(source.resolved_path(), PathBuf::from("MyCycle.cxx"));
        assert_eq!(source.resolved_header_path(), PathBuf::from("MyCycle.h"));
        assert_eq!(
            RegistryOptions::new(&names, &fields).resolved_path(),
            PathBuf::from("LinkDef.h")
        );
        let config = ConfigOptions::new(&names);
        assert_eq!(config.resolved_path(), PathBuf::from("MyCycle_config.xml"));
        assert_eq!(config.job_name(), "MyCycleJob");
    }

    #[test]
    fn asset_paths_live_under_user_config() {
        let assets = AssetConfig::new("/opt/sframe");
        assert_eq!(
            assets.example_config(),
            PathBuf::from("/opt/sframe/user/config/FirstCycle_config.xml")
        );
        assert_eq!(
            assets.job_config_dtd(),
            PathBuf::from("/opt/sframe/user/config/JobConfig.dtd")
        );
    }
}
