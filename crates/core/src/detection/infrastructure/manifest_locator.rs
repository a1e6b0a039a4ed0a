use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::detection::domain::detection_config::DetectionConfig;
use crate::detection::domain::face_locator::FaceLocator;
use crate::shared::error::AnalysisError;
use crate::shared::region::Region;
use crate::shared::source_image::SourceImage;

/// Image id → regions, as produced by an external detector run.
pub type RegionManifest = HashMap<String, Vec<Region>>;

/// Replays pre-computed detection results by image id.
///
/// The manifest is a JSON object mapping image file names to region lists:
/// `{"a.png": [{"x": 10, "y": 20, "width": 64, "height": 64}]}`.
/// Images absent from the manifest have no faces.
#[derive(Clone)]
pub struct ManifestLocator {
    manifest: Arc<RegionManifest>,
}

impl ManifestLocator {
    pub fn new(manifest: Arc<RegionManifest>) -> Self {
        Self { manifest }
    }

    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let manifest: RegionManifest = serde_json::from_str(json)
            .map_err(|e| AnalysisError::Config(format!("invalid region manifest: {e}")))?;
        Ok(Self::new(Arc::new(manifest)))
    }

    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let json = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.manifest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }
}

impl FaceLocator for ManifestLocator {
    fn locate(
        &mut self,
        image: &SourceImage,
        _config: &DetectionConfig,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        Ok(self.manifest.get(image.id()).cloned().unwrap_or_default())
    }
}
