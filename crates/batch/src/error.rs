use std::path::PathBuf;

use handbook_core::StructuralError;
use thiserror::Error;

/// Errors that stop a whole batch run.
///
/// Per-unit failures are not errors here; they are recorded in the report.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// A configuration document is not valid.
    #[error("invalid batch configuration: {0}")]
    Config(#[from] serde_yaml::Error),
    /// The unit collection is structurally malformed.
    #[error(transparent)]
    Structural(#[from] StructuralError),
    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
