use std::path::PathBuf;

use thiserror::Error;

/// Failures that terminate an analysis run.
///
/// Per-image and per-region conditions (unreadable image, no detections,
/// degenerate region) are not errors: they are logged and counted in the
/// batch summary.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no faces were extracted from the batch")]
    EmptyBatch,
    #[error("{what} shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report: {0}")]
    Report(String),
    #[error("worker failed: {0}")]
    Worker(String),
}

impl AnalysisError {
    pub fn shape_mismatch(
        what: &'static str,
        expected: impl std::fmt::Debug,
        actual: impl std::fmt::Debug,
    ) -> Self {
        AnalysisError::ShapeMismatch {
            what,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}
