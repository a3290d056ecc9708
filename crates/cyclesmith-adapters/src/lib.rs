//! Infrastructure adapters for cyclesmith.
//!
//! This crate implements the ports defined in `cyclesmith_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod field_source;
pub mod filesystem;

// Re-export commonly used adapters
pub use field_source::{SchemaFieldSource, parse_schema, parse_selection};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
