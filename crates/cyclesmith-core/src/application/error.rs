//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not text logic.
//! Pure logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur while generating a cycle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared in-memory state was poisoned.
    #[error("Filesystem state lock poisoned")]
    LockPoisoned,

    /// The example job configuration is not where the template root says.
    #[error("Example job configuration not found at {path}")]
    ConfigTemplateMissing { path: PathBuf },

    /// The auxiliary file to copy is not where the template root says.
    #[error("Auxiliary template not found at {path}")]
    AuxTemplateMissing { path: PathBuf },

    /// A document on disk could not be used.
    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    /// A selection or data file could not be read.
    #[error("Cannot read fields from {path}: {reason}")]
    FieldSource { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Wrap a domain error raised while handling `path`.
    pub fn document(path: impl Into<PathBuf>, source: DomainError) -> Self {
        Self::Document {
            path: path.into(),
            source,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ConfigTemplateMissing { .. } | Self::AuxTemplateMissing { .. } => vec![
                "Point --template-root (or SFRAME_DIR) at an SFrame installation".into(),
                "The files are expected under <root>/user/config/".into(),
            ],
            Self::Document { source, .. } => source.suggestions(),
            Self::FieldSource { path, .. } => vec![
                format!("Check the contents of {}", path.display()),
                "Selection files hold one '<type> <name>' per line".into(),
            ],
            Self::LockPoisoned => vec!["This appears to be a bug in cyclesmith".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::ConfigTemplateMissing { .. } | Self::AuxTemplateMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::Document { source, .. } => source.category().into(),
            Self::FieldSource { .. } => ErrorCategory::Validation,
        }
    }
}
