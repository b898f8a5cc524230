#![deny(missing_docs)]
//! Handbook batch processing: selects a handbook's units, builds the document
//! tree, compiles every unit in parallel and reports the outcome.

/// Report and statistics types.
pub mod batch;
/// Batch configuration loaded from YAML.
pub mod config;
/// Batch-level errors.
pub mod error;
/// The unit-processing pipeline.
pub mod pipeline;

pub use batch::{BatchReport, BatchStats, UnitResult};
pub use config::{BatchConfig, FailurePolicy, HandbookConfig};
pub use error::BatchError;
pub use pipeline::{Pipeline, ingest};
