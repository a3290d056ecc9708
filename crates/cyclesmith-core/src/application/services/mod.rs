//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a cycle" or "resolve the analysis name".
//! Each emitter owns one output file; [`CycleService`] runs them in order.

pub mod artifact_writer;
pub mod aux_copier;
pub mod config_emitter;
pub mod cycle_service;
pub mod header_emitter;
pub mod name_resolver;
pub mod registry_emitter;
pub mod report;
pub mod source_emitter;

pub use aux_copier::AuxCopier;
pub use config_emitter::ConfigEmitter;
pub use cycle_service::{CyclePlan, CycleRequest, CycleService};
pub use header_emitter::HeaderEmitter;
pub use name_resolver::NameResolver;
pub use registry_emitter::RegistryEmitter;
pub use report::{
    AuxOutcome, CycleReport, FORMATTER_REMINDER, RegistryOutcome, Step, StepOutcome, StepReport,
    WrittenFile,
};
pub use source_emitter::SourceEmitter;
