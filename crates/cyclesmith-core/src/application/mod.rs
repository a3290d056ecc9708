//! Application layer for cyclesmith.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CycleService and the emitters it runs)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All text and tree rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CyclePlan,
    CycleReport, // DTO for the per-step outcome
    CycleRequest,
    CycleService,
    NameResolver,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FieldSource, Filesystem};

pub use error::ApplicationError;
