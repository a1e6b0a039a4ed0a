use serde::{Deserialize, Serialize};

use crate::shared::error::AnalysisError;

pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
pub const DEFAULT_MIN_NEIGHBORS: u32 = 5;
pub const DEFAULT_MIN_SIZE: u32 = 24;

/// Parameters handed to every [`FaceLocator`] call.
///
/// `scale_factor` and `min_neighbors` are meaningful to multi-scale
/// cascade detectors only; `min_size` is also enforced by the pipeline.
///
/// [`FaceLocator`]: crate::detection::domain::face_locator::FaceLocator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub scale_factor: f64,
    pub min_neighbors: u32,
    pub min_size: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.scale_factor.is_nan() || self.scale_factor <= 1.0 {
            return Err(AnalysisError::Config(format!(
                "scale factor must be greater than 1.0, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }
}
