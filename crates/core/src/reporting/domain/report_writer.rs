use std::path::{Path, PathBuf};

use crate::pipeline::analyze_faces_use_case::AnalysisOutcome;
use crate::shared::error::AnalysisError;

/// Files produced by one report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportPaths {
    pub average_face: PathBuf,
    /// Per-face images in rank order.
    pub faces: Vec<PathBuf>,
    pub stats: PathBuf,
    pub details: PathBuf,
    pub json: PathBuf,
}

/// Persists a completed analysis.
pub trait ReportWriter {
    fn write(&self, outcome: &AnalysisOutcome, dir: &Path) -> Result<ReportPaths, AnalysisError>;
}
