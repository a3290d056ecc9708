//! Cyclesmith Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the cyclesmith
//! analysis cycle generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          cyclesmith-cli (CLI)           │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (CycleService, emitters, report)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: Filesystem, FieldSource)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    cyclesmith-adapters (Infrastructure) │
//! │ (LocalFilesystem, SchemaFieldSource...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (FieldModel, rendering, registry, XML)  │
//! │              No I/O                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cyclesmith_core::prelude::*;
//!
//! // Adapters come from cyclesmith-adapters.
//! let service = CycleService::new(filesystem, fields, AssetConfig::new("/opt/sframe"));
//!
//! let mut request = CycleRequest::new("Ana::ElectronCycle", "./Ana");
//! request.output_tree = Some("Electrons".into());
//! let report = service.create(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CyclePlan, CycleReport, CycleRequest, CycleService,
        ports::{FieldSource, Filesystem},
        services::{Step, StepOutcome},
    };
    pub use crate::domain::{AssetConfig, DataType, FieldModel, GenerationOptions, NamePair};
    pub use crate::error::{CycleError, CycleResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
