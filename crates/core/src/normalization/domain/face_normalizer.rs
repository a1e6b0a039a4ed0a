use image::imageops::FilterType;

use crate::normalization::domain::face_sample::{FaceSample, Provenance};
use crate::shared::config::{AnalysisConfig, ColorMode};
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::shared::source_image::SourceImage;

/// Crops detected regions and stretches them to the canonical resolution.
///
/// No letterboxing: the crop is resized directly to the target dimensions,
/// which suits the square or near-square boxes detectors produce.
pub struct FaceNormalizer {
    width: u32,
    height: u32,
    color_mode: ColorMode,
    filter: FilterType,
}

impl FaceNormalizer {
    pub fn new(width: u32, height: u32, color_mode: ColorMode, filter: FilterType) -> Self {
        Self {
            width,
            height,
            color_mode,
            filter,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.canonical_width,
            config.canonical_height,
            config.color_mode,
            config.interpolation.filter_type(),
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel count of the display buffers this normalizer produces.
    pub fn channels(&self) -> u8 {
        self.color_mode.channels()
    }

    /// Returns `None` when the region clamps to zero area inside the image.
    pub fn normalize(
        &self,
        image: &SourceImage,
        region: &Region,
        detection_index: usize,
    ) -> Option<FaceSample> {
        let frame = image.frame();
        let clamped = region.clamp_to(frame.width(), frame.height())?;
        let resized = self.resize(&frame.crop(&clamped));
        let gray = resized.to_gray();

        let display = match (self.color_mode, resized.channels()) {
            (ColorMode::Grayscale, _) => Frame::new(
                gray.iter().copied().collect(),
                self.width,
                self.height,
                1,
                image.index(),
            ),
            (ColorMode::Color, 1) => Frame::new(
                gray.iter().flat_map(|&v| [v, v, v]).collect(),
                self.width,
                self.height,
                3,
                image.index(),
            ),
            (ColorMode::Color, _) => resized,
        };

        let provenance = Provenance::new(image.id(), image.index(), detection_index);
        Some(FaceSample::new(provenance, display, gray))
    }

    fn resize(&self, crop: &Frame) -> Frame {
        let (w, h) = (crop.width(), crop.height());
        let (data, channels) = if crop.channels() == 1 {
            let img = image::GrayImage::from_raw(w, h, crop.data().to_vec())
                .expect("Frame data length must match dimensions");
            (image::imageops::resize(&img, self.width, self.height, self.filter).into_raw(), 1)
        } else {
            let img = image::RgbImage::from_raw(w, h, crop.data().to_vec())
                .expect("Frame data length must match dimensions");
            (image::imageops::resize(&img, self.width, self.height, self.filter).into_raw(), 3)
        };
        Frame::new(data, self.width, self.height, channels, crop.index())
    }
}
