//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cyclesmith-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::FieldModel;
use crate::error::CycleResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cyclesmith_adapters::filesystem::LocalFilesystem` (production)
/// - `cyclesmith_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> CycleResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> CycleResult<()>;

    /// Move a file to a new location, replacing any file there.
    fn rename(&self, from: &Path, to: &Path) -> CycleResult<()>;

    /// Copy a file.
    fn copy_file(&self, from: &Path, to: &Path) -> CycleResult<()>;

    /// Entries directly inside a directory, sorted.
    fn list_dir(&self, path: &Path) -> CycleResult<Vec<PathBuf>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CycleResult<()>;
}

/// Port for obtaining the fields a cycle reads.
///
/// Implemented by:
/// - `cyclesmith_adapters::field_source::SchemaFieldSource`
#[cfg_attr(test, mockall::automock)]
pub trait FieldSource: Send + Sync {
    /// Tree to read when none was named explicitly.
    ///
    /// With a data file this is the first tree it describes; without one it
    /// is the conventional default tree name.
    fn default_tree_name<'a>(&self, data_file: Option<&'a Path>) -> CycleResult<String>;

    /// Fields listed in a user-written selection file.
    fn read_selection(&self, path: &Path) -> CycleResult<Vec<FieldModel>>;

    /// Fields of `tree` found by introspecting a data file.
    fn read_fields(&self, data_file: &Path, tree: &str) -> CycleResult<Vec<FieldModel>>;
}
