// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep a copy per step)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid cycle name '{name}': {reason}")]
    InvalidCycleName { name: String, reason: String },

    #[error("Invalid Monte-Carlo tag pattern '{pattern}': {reason}")]
    InvalidTagPattern { pattern: String, reason: String },

    #[error("Invalid field selection at line {line}: {reason}")]
    InvalidFieldSelection { line: usize, reason: String },

    // ========================================================================
    // Document Structure Errors
    // ========================================================================
    #[error("Registry file has no closing '{sentinel}' line")]
    MissingSentinel { sentinel: &'static str },

    #[error("Expected exactly one <{element}> section, found {found}")]
    UnexpectedSectionCount { element: &'static str, found: usize },

    #[error("Expected at least one <{element}> element inside <{parent}>")]
    MissingExemplar {
        element: &'static str,
        parent: &'static str,
    },

    #[error("Malformed XML document: {reason}")]
    MalformedDocument { reason: String },

    // ========================================================================
    // Conflicts
    // ========================================================================
    #[error(
        "Conflicting analysis names: directory '{directory}', build file '{build_file}', registry '{registry}'"
    )]
    AnalysisNameConflict {
        directory: String,
        build_file: String,
        registry: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidCycleName { .. } => vec![
                "Cycle names must be C++ identifiers, optionally prefixed by a namespace".into(),
                "Examples: MyCycle, Ana::ElectronCycle".into(),
            ],
            Self::InvalidTagPattern { pattern, .. } => vec![
                format!("'{}' is not a valid regular expression", pattern),
                "Tags are comma separated regular expressions, e.g. --mc-tags 'mc_,truth'".into(),
            ],
            Self::InvalidFieldSelection { line, .. } => vec![
                format!("Check line {} of the selection file", line),
                "Each line should read '<type> <name>', e.g. 'std::vector<float> el_pt'".into(),
            ],
            Self::MissingSentinel { sentinel } => vec![
                format!("Add a closing '{}' line to the LinkDef file", sentinel),
                "Or remove the file and let it be regenerated".into(),
            ],
            Self::UnexpectedSectionCount { .. }
            | Self::MissingExemplar { .. }
            | Self::MalformedDocument { .. } => vec![
                "The example job configuration has an unexpected structure".into(),
                "Check that the template root points at an unmodified installation".into(),
            ],
            Self::AnalysisNameConflict { .. } => vec![
                "Specify the analysis name explicitly with --analysis".into(),
                "Or make the directory name, the Makefile LIBRARY and include/<name>_LinkDef.h agree"
                    .into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCycleName { .. }
            | Self::InvalidTagPattern { .. }
            | Self::InvalidFieldSelection { .. } => ErrorCategory::Validation,
            Self::MissingSentinel { .. }
            | Self::UnexpectedSectionCount { .. }
            | Self::MissingExemplar { .. }
            | Self::MalformedDocument { .. } => ErrorCategory::Structure,
            Self::AnalysisNameConflict { .. } => ErrorCategory::Conflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Structure,
    Conflict,
}
