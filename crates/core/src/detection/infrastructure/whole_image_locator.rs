use crate::detection::domain::detection_config::DetectionConfig;
use crate::detection::domain::face_locator::FaceLocator;
use crate::shared::region::Region;
use crate::shared::source_image::SourceImage;

/// Treats every input image as one pre-cropped face.
pub struct WholeImageLocator;

impl WholeImageLocator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WholeImageLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceLocator for WholeImageLocator {
    fn locate(
        &mut self,
        image: &SourceImage,
        _config: &DetectionConfig,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let frame = image.frame();
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(Vec::new());
        }
        Ok(vec![Region::new(
            0,
            0,
            frame.width() as i32,
            frame.height() as i32,
        )])
    }
}
