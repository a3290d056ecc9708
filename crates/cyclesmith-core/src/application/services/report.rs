//! What a cycle generation did, step by step.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::DataType;
use crate::error::CycleError;

/// Printed after a successful run.
pub const FORMATTER_REMINDER: &str =
    "Please indent the code using your favourite formatter like 'Artistic Style' (astyle).";

/// Result of writing a file under the backup rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Where the previous content went, if there was any.
    pub backup: Option<PathBuf>,
}

/// What the registry emitter did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RegistryOutcome {
    Created { file: WrittenFile, lines: Vec<String> },
    Extended { file: WrittenFile, lines: Vec<String> },
    Unchanged { path: PathBuf },
}

impl RegistryOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Created { file, .. } | Self::Extended { file, .. } => &file.path,
            Self::Unchanged { path } => path,
        }
    }

    pub fn lines_added(&self) -> usize {
        match self {
            Self::Created { lines, .. } | Self::Extended { lines, .. } => lines.len(),
            Self::Unchanged { .. } => 0,
        }
    }
}

/// What the auxiliary file copier did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuxOutcome {
    Copied { from: PathBuf, to: PathBuf },
    Kept { path: PathBuf },
}

/// Generation steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Header,
    Registry,
    Source,
    Config,
    AuxFile,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Header => "header",
            Self::Registry => "registry",
            Self::Source => "source",
            Self::Config => "config",
            Self::AuxFile => "aux file",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Written(WrittenFile),
    Registry(RegistryOutcome),
    Aux(AuxOutcome),
    Failed {
        error: String,
        suggestions: Vec<String>,
    },
}

impl StepOutcome {
    pub fn failed(err: &CycleError) -> Self {
        Self::Failed {
            error: err.to_string(),
            suggestions: err.suggestions(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Summary of one `create` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub cycle: String,
    pub analysis: String,
    pub data_type: DataType,
    pub field_count: usize,
    pub steps: Vec<StepReport>,
    pub warnings: Vec<String>,
    pub reminder: &'static str,
}

impl CycleReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.outcome.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step == step).map(|s| &s.outcome)
    }
}
