//! Evidence for the analysis (package) name.
//!
//! The name is read from three independent places and must agree in all of
//! them; there is no guessing when they differ.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{error::DomainError, layout::REGISTRY_SUFFIX};

/// Build file carrying the `LIBRARY = <name>` assignment.
pub const BUILD_FILE: &str = "Makefile";

static LIBRARY_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"LIBRARY[ \t]*=[ \t]*(?P<name>[a-zA-Z][a-zA-Z0-9_]*)")
        .expect("library pattern is valid")
});

/// What the registry files under `include/` say about the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvidence {
    /// Exactly one `*_LinkDef.h` file.
    Unique(String),
    /// No registry file at all.
    Missing,
    /// More than one candidate.
    Ambiguous(usize),
}

impl RegistryEvidence {
    /// Inspect the files found in the include directory.
    pub fn from_files(files: &[PathBuf]) -> Self {
        let names: Vec<String> = files
            .iter()
            .filter_map(|p| registry_stem(p))
            .collect();
        match names.as_slice() {
            [] => Self::Missing,
            [one] => Self::Unique(one.clone()),
            many => Self::Ambiguous(many.len()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unique(name) => Some(name),
            _ => None,
        }
    }
}

/// `MyAnalysis` for `include/MyAnalysis_LinkDef.h`.
fn registry_stem(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(REGISTRY_SUFFIX)?;
    (!stem.is_empty()).then(|| stem.to_string())
}

/// Library name assigned in a Makefile, if any.
pub fn name_from_build_file(contents: &str) -> Option<String> {
    LIBRARY_ASSIGNMENT
        .captures(contents)
        .map(|caps| caps["name"].to_string())
}

/// The three name sources side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEvidence {
    pub directory: Option<String>,
    pub build_file: Option<String>,
    pub registry: RegistryEvidence,
}

impl NameEvidence {
    /// The agreed name, or a conflict listing what each source said.
    pub fn resolve(&self) -> Result<String, DomainError> {
        match (
            self.directory.as_deref(),
            self.build_file.as_deref(),
            self.registry.name(),
        ) {
            (Some(dir), Some(make), Some(linkdef)) if dir == make && dir == linkdef => {
                Ok(dir.to_string())
            }
            (dir, make, linkdef) => Err(DomainError::AnalysisNameConflict {
                directory: dir.unwrap_or_default().to_string(),
                build_file: make.unwrap_or_default().to_string(),
                registry: linkdef.unwrap_or_default().to_string(),
            }),
        }
    }
}
