use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::detection::domain::detection_config::DetectionConfig;
use crate::detection::domain::face_locator::FaceLocator;
use crate::features::domain::feature_extractor::FeatureExtractor;
use crate::features::domain::feature_vector::FeatureVector;
use crate::imaging::domain::image_reader::ImageReader;
use crate::normalization::domain::face_normalizer::FaceNormalizer;
use crate::normalization::domain::face_sample::FaceSample;
use crate::pipeline::region_filter::filter_regions;
use crate::shared::config::AnalysisConfig;
use crate::shared::error::AnalysisError;

/// A normalized face and its descriptor.
#[derive(Clone, Debug)]
pub struct CollectedFace {
    pub sample: FaceSample,
    pub features: FeatureVector,
}

/// What happened to one input image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageStatus {
    /// Regions were located; `faces` holds every one that survived normalization.
    Processed,
    Unreadable,
    /// The locator ran but nothing survived the region filter.
    NoDetections,
    LocatorFailed,
}

/// Per-image result handed from workers to the aggregating thread.
#[derive(Clone, Debug)]
pub struct ImageOutcome {
    pub index: usize,
    pub path: PathBuf,
    pub status: ImageStatus,
    pub faces: Vec<CollectedFace>,
    /// Regions dropped for being smaller than the minimum face size.
    pub regions_filtered: usize,
    /// Regions that clamped to zero area.
    pub regions_discarded: usize,
    pub timings: Vec<(&'static str, f64)>,
}

impl ImageOutcome {
    fn new(index: usize, path: &Path) -> Self {
        Self {
            index,
            path: path.to_path_buf(),
            status: ImageStatus::Processed,
            faces: Vec::new(),
            regions_filtered: 0,
            regions_discarded: 0,
            timings: Vec::new(),
        }
    }

    fn record(&mut self, stage: &'static str, start: Instant) {
        self.timings
            .push((stage, start.elapsed().as_secs_f64() * 1000.0));
    }
}

/// Runs one image through decode, locate, filter, normalize and extract.
///
/// Shared by every collector. Holds no per-image state, so a single
/// processor serves all workers; each worker brings its own locator.
pub struct FaceProcessor {
    reader: Arc<dyn ImageReader>,
    normalizer: FaceNormalizer,
    extractor: FeatureExtractor,
    detection: DetectionConfig,
}

impl FaceProcessor {
    pub fn new(
        reader: Arc<dyn ImageReader>,
        normalizer: FaceNormalizer,
        extractor: FeatureExtractor,
        detection: DetectionConfig,
    ) -> Self {
        Self {
            reader,
            normalizer,
            extractor,
            detection,
        }
    }

    /// Validates `config` and builds the normalizer and extractor from it.
    pub fn from_config(
        config: &AnalysisConfig,
        reader: Arc<dyn ImageReader>,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        let extractor = FeatureExtractor::new(
            &config.features,
            config.canonical_width,
            config.canonical_height,
        )?;
        Ok(Self::new(
            reader,
            FaceNormalizer::from_config(config),
            extractor,
            config.detection.clone(),
        ))
    }

    pub fn normalizer(&self) -> &FaceNormalizer {
        &self.normalizer
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Per-image failures are logged and reported in the outcome status.
    /// Only feature-extraction errors, which indicate a misconfigured
    /// pipeline rather than a bad image, are returned as `Err`.
    pub fn process(
        &self,
        locator: &mut dyn FaceLocator,
        path: &Path,
        index: usize,
    ) -> Result<ImageOutcome, AnalysisError> {
        let mut outcome = ImageOutcome::new(index, path);

        let start = Instant::now();
        let image = match self.reader.read(path, index) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Skipping unreadable image {}: {e}", path.display());
                outcome.status = ImageStatus::Unreadable;
                return Ok(outcome);
            }
        };
        outcome.record("decode", start);

        let start = Instant::now();
        let located = match locator.locate(&image, &self.detection) {
            Ok(regions) => regions,
            Err(e) => {
                log::warn!("Face locator failed on {}: {e}", image.id());
                outcome.status = ImageStatus::LocatorFailed;
                return Ok(outcome);
            }
        };
        outcome.record("locate", start);

        let regions = filter_regions(&located, self.detection.min_size);
        outcome.regions_filtered = located.len() - regions.len();
        if regions.is_empty() {
            log::info!("No faces detected in {}", image.id());
            outcome.status = ImageStatus::NoDetections;
            return Ok(outcome);
        }

        let start = Instant::now();
        let samples: Vec<FaceSample> = regions
            .iter()
            .enumerate()
            .filter_map(|(detection_index, region)| {
                let sample = self.normalizer.normalize(&image, region, detection_index);
                if sample.is_none() {
                    log::debug!(
                        "Discarding degenerate region {region:?} in {}",
                        image.id()
                    );
                }
                sample
            })
            .collect();
        outcome.regions_discarded = regions.len() - samples.len();
        outcome.record("normalize", start);

        let start = Instant::now();
        for sample in samples {
            let features = self.extractor.extract_sample(&sample)?;
            outcome.faces.push(CollectedFace { sample, features });
        }
        outcome.record("features", start);

        log::debug!("{}: {} face(s)", image.id(), outcome.faces.len());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{
        gray_frame, FixedLocator, SelectivelyFailingLocator, StubImageReader,
    };
    use crate::shared::region::Region;

    fn processor(reader: StubImageReader) -> FaceProcessor {
        let config = AnalysisConfig {
            canonical_width: 32,
            canonical_height: 32,
            interpolation: crate::shared::config::Interpolation::Triangle,
            workers: 1,
            ..AnalysisConfig::default()
        };
        FaceProcessor::from_config(&config, Arc::new(reader)).unwrap()
    }

    fn reader() -> StubImageReader {
        StubImageReader::default()
            .with("a.png", gray_frame(100, 100, |x, y| ((x + y) % 256) as u8))
            .with("fail.png", gray_frame(100, 100, |_, _| 10))
    }

    #[test]
    fn test_extracts_one_face_per_surviving_region() {
        let p = processor(reader());
        let mut locator = FixedLocator(vec![
            Region::new(0, 0, 40, 40),
            Region::new(50, 50, 40, 40),
        ]);

        let outcome = p.process(&mut locator, Path::new("a.png"), 7).unwrap();

        assert_eq!(outcome.status, ImageStatus::Processed);
        assert_eq!(outcome.index, 7);
        assert_eq!(outcome.faces.len(), 2);
        let first = outcome.faces[0].sample.provenance();
        assert_eq!((first.image_id.as_str(), first.image_index), ("a.png", 7));
        assert_eq!(outcome.faces[1].sample.provenance().detection_index, 1);
        assert_eq!(
            outcome.faces[0].features.len(),
            p.extractor().layout().vector_len()
        );
        let stages: Vec<_> = outcome.timings.iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, vec!["decode", "locate", "normalize", "features"]);
    }

    #[test]
    fn test_unreadable_image_is_skipped() {
        let p = processor(reader());
        let mut locator = FixedLocator(vec![Region::new(0, 0, 40, 40)]);

        let outcome = p.process(&mut locator, Path::new("missing.png"), 0).unwrap();

        assert_eq!(outcome.status, ImageStatus::Unreadable);
        assert!(outcome.faces.is_empty());
    }

    #[test]
    fn test_zero_detections_reported() {
        let p = processor(reader());
        let outcome = p
            .process(&mut FixedLocator(vec![]), Path::new("a.png"), 0)
            .unwrap();
        assert_eq!(outcome.status, ImageStatus::NoDetections);
        assert!(outcome.faces.is_empty());
    }

    #[test]
    fn test_locator_failure_is_skipped() {
        let p = processor(reader());
        let outcome = p
            .process(&mut SelectivelyFailingLocator, Path::new("fail.png"), 0)
            .unwrap();
        assert_eq!(outcome.status, ImageStatus::LocatorFailed);
    }

    #[test]
    fn test_small_regions_are_filtered_and_overlapping_ones_kept() {
        let p = processor(reader());
        let mut locator = FixedLocator(vec![
            Region::new(0, 0, 40, 40),
            Region::new(1, 1, 40, 40),
            Region::new(60, 60, 10, 10),
        ]);

        let outcome = p.process(&mut locator, Path::new("a.png"), 0).unwrap();

        assert_eq!(outcome.faces.len(), 2);
        assert_eq!(outcome.regions_filtered, 1);
        let detections: Vec<_> = outcome
            .faces
            .iter()
            .map(|f| f.sample.provenance().detection_index)
            .collect();
        assert_eq!(detections, vec![0, 1]);
    }

    #[test]
    fn test_far_off_image_regions_are_discarded_without_panicking() {
        let p = processor(reader());
        let mut locator = FixedLocator(vec![
            Region::new(2_000_000_000, 0, 500_000_000, 40),
            Region::new(2_000_000_000, 0, 500_000_000, 40),
            Region::new(10, 10, 40, 40),
        ]);

        let outcome = p.process(&mut locator, Path::new("a.png"), 0).unwrap();

        assert_eq!(outcome.status, ImageStatus::Processed);
        assert_eq!(outcome.regions_discarded, 2);
        assert_eq!(outcome.faces.len(), 1);
        assert_eq!(outcome.faces[0].sample.provenance().detection_index, 2);
    }

    #[test]
    fn test_degenerate_regions_are_discarded_and_counted() {
        let p = processor(reader());
        let mut locator = FixedLocator(vec![
            Region::new(200, 200, 40, 40),
            Region::new(10, 10, 40, 40),
        ]);

        let outcome = p.process(&mut locator, Path::new("a.png"), 0).unwrap();

        assert_eq!(outcome.status, ImageStatus::Processed);
        assert_eq!(outcome.regions_discarded, 1);
        assert_eq!(outcome.faces.len(), 1);
        assert_eq!(outcome.faces[0].sample.provenance().detection_index, 1);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = AnalysisConfig {
            canonical_width: 100,
            ..AnalysisConfig::default()
        };
        let result = FaceProcessor::from_config(&config, Arc::new(StubImageReader::default()));
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }
}
