//! Where generated files go inside an analysis package.
//!
//! A package created by the framework's skeleton script has `include/`,
//! `src/` and `config/` directories. Whichever of them exists receives the
//! corresponding file; otherwise the file lands in the package root.

use std::path::{Path, PathBuf};

pub const INCLUDE_DIR: &str = "include";
pub const SOURCE_DIR: &str = "src";
pub const CONFIG_DIR: &str = "config";
/// Suffix of per-package registry files, e.g. `MyAnalysis_LinkDef.h`.
pub const REGISTRY_SUFFIX: &str = "_LinkDef.h";

/// Detected directory layout of an analysis package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    include_dir: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
}

impl ProjectLayout {
    /// Look in `root` for the conventional directories using `is_dir`.
    pub fn detect(root: &Path, is_dir: impl Fn(&Path) -> bool) -> Self {
        let existing = |name: &str| {
            let dir = root.join(name);
            is_dir(&dir).then_some(dir)
        };
        Self {
            root: root.to_path_buf(),
            include_dir: existing(INCLUDE_DIR),
            source_dir: existing(SOURCE_DIR),
            config_dir: existing(CONFIG_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn include_or_root(&self) -> &Path {
        self.include_dir.as_deref().unwrap_or(&self.root)
    }

    pub fn header_path(&self, class_name: &str) -> PathBuf {
        self.include_or_root().join(format!("{class_name}.h"))
    }

    pub fn source_path(&self, class_name: &str) -> PathBuf {
        self.source_dir
            .as_deref()
            .unwrap_or(&self.root)
            .join(format!("{class_name}.cxx"))
    }

    pub fn config_path(&self, class_name: &str) -> PathBuf {
        self.config_dir().join(format!("{class_name}_config.xml"))
    }

    /// `<include>/<analysis>_LinkDef.h`.
    pub fn registry_path(&self, analysis: &str) -> PathBuf {
        self.include_or_root()
            .join(format!("{analysis}{REGISTRY_SUFFIX}"))
    }

    /// Directory receiving the job configuration and its DTD.
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone().unwrap_or_else(|| self.root.clone())
    }
}
