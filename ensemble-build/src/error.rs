//! Error types for ensemble-build.

use std::path::PathBuf;

use thiserror::Error;

use ensemble_scan::ScanError;

/// All fatal errors that can arise from a pipeline run.
///
/// A failing build command is deliberately *not* represented here; it is an
/// outcome value ([`crate::BuildStatus::Failed`]) and never aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An error from workspace enumeration.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// A filesystem error, tagged with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Shorthand for building [`PipelineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.into(),
        source,
    }
}
