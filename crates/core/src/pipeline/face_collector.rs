use std::path::PathBuf;

use crate::detection::domain::face_locator::LocatorFactory;
use crate::pipeline::face_processor::{FaceProcessor, ImageOutcome};
use crate::shared::error::AnalysisError;

/// Receives image outcomes, in input order, on the calling thread.
pub type OutcomeSink<'a> = dyn FnMut(ImageOutcome) -> Result<(), AnalysisError> + 'a;

/// Drives a [`FaceProcessor`] over a batch of image paths.
///
/// Implementations decide how the work is scheduled but must hand outcomes
/// to `sink` in path order, one per path, so aggregation and ranking are
/// identical regardless of worker count. An error from `sink` or from the
/// processor stops the batch.
pub trait FaceCollector: Send {
    fn collect(
        &self,
        paths: &[PathBuf],
        processor: &FaceProcessor,
        locators: &LocatorFactory,
        sink: &mut OutcomeSink<'_>,
    ) -> Result<(), AnalysisError>;
}
