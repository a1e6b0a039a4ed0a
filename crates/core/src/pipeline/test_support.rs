use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::detection::domain::detection_config::DetectionConfig;
use crate::detection::domain::face_locator::{FaceLocator, LocatorFactory};
use crate::detection::infrastructure::whole_image_locator::WholeImageLocator;
use crate::imaging::domain::image_reader::ImageReader;
use crate::pipeline::face_processor::{FaceProcessor, ImageOutcome};
use crate::shared::config::{AnalysisConfig, Interpolation};
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::shared::source_image::SourceImage;

/// In-memory reader keyed by path. Unknown paths fail to decode.
#[derive(Default)]
pub struct StubImageReader {
    frames: HashMap<PathBuf, Frame>,
}

impl StubImageReader {
    pub fn with(mut self, name: &str, frame: Frame) -> Self {
        self.frames.insert(PathBuf::from(name), frame);
        self
    }
}

impl ImageReader for StubImageReader {
    fn read(&self, path: &Path, index: usize) -> Result<SourceImage, Box<dyn std::error::Error>> {
        let frame = self
            .frames
            .get(path)
            .ok_or_else(|| format!("cannot decode {}", path.display()))?;
        let frame = Frame::new(
            frame.data().to_vec(),
            frame.width(),
            frame.height(),
            frame.channels(),
            index,
        );
        let id = path.display().to_string();
        Ok(SourceImage::new(id, frame))
    }
}

/// Returns fixed regions for every image.
pub struct FixedLocator(pub Vec<Region>);

impl FaceLocator for FixedLocator {
    fn locate(
        &mut self,
        _image: &SourceImage,
        _config: &DetectionConfig,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        Ok(self.0.clone())
    }
}

/// Fails on image ids that start with `fail`, otherwise returns the whole image.
pub struct SelectivelyFailingLocator;

impl FaceLocator for SelectivelyFailingLocator {
    fn locate(
        &mut self,
        image: &SourceImage,
        config: &DetectionConfig,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        if image.id().starts_with("fail") {
            return Err("model exploded".into());
        }
        WholeImageLocator.locate(image, config)
    }
}

pub fn whole_image_factory() -> LocatorFactory {
    Arc::new(|| Box::new(WholeImageLocator) as Box<dyn FaceLocator>)
}

pub fn gray_frame(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Frame {
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(f(x, y));
        }
    }
    Frame::new(data, width, height, 1, 0)
}

pub fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

/// Runs a 100x100 gray image through a small processor with `faces`
/// identical regions. Zero regions yields a `NoDetections` outcome.
pub fn outcome_with_faces(name: &str, index: usize, faces: usize) -> ImageOutcome {
    let config = AnalysisConfig {
        canonical_width: 32,
        canonical_height: 32,
        interpolation: Interpolation::Triangle,
        workers: 1,
        ..AnalysisConfig::default()
    };
    let reader = StubImageReader::default().with(name, gray_frame(100, 100, |x, y| (x + y) as u8));
    let processor = FaceProcessor::from_config(&config, Arc::new(reader)).unwrap();
    let mut locator = FixedLocator(vec![Region::new(0, 0, 40, 40); faces]);
    processor
        .process(&mut locator, Path::new(name), index)
        .unwrap()
}
