use std::sync::Arc;

use crate::detection::domain::detection_config::DetectionConfig;
use crate::shared::region::Region;
use crate::shared::source_image::SourceImage;

/// Domain interface for the external face-region detector.
///
/// Given an image, returns zero or more axis-aligned regions in detection
/// order. Implementations may be stateful, hence `&mut self`.
pub trait FaceLocator: Send {
    fn locate(
        &mut self,
        image: &SourceImage,
        config: &DetectionConfig,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

/// Builds one locator per worker thread.
pub type LocatorFactory = Arc<dyn Fn() -> Box<dyn FaceLocator> + Send + Sync>;
