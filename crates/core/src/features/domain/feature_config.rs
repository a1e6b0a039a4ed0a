use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_CELL_SIZE, DEFAULT_HISTOGRAM_BINS, DEFAULT_ORIENTATION_BINS, LBP_CODES,
};
use crate::shared::error::AnalysisError;

/// Bin and cell geometry for the three feature segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub histogram_bins: usize,
    pub cell_size: usize,
    pub orientation_bins: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            cell_size: DEFAULT_CELL_SIZE,
            orientation_bins: DEFAULT_ORIENTATION_BINS,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self, width: usize, height: usize) -> Result<(), AnalysisError> {
        if self.histogram_bins == 0 || self.histogram_bins > 256 {
            return Err(AnalysisError::Config(format!(
                "histogram bins must be in 1..=256, got {}",
                self.histogram_bins
            )));
        }
        if self.orientation_bins == 0 {
            return Err(AnalysisError::Config(
                "orientation bins must be at least 1".into(),
            ));
        }
        if self.cell_size == 0 || width % self.cell_size != 0 || height % self.cell_size != 0 {
            return Err(AnalysisError::Config(format!(
                "cell size {} must evenly divide the canonical resolution {width}x{height}",
                self.cell_size
            )));
        }
        Ok(())
    }
}

/// Segment lengths and offsets, derived once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pub width: usize,
    pub height: usize,
    pub histogram_bins: usize,
    pub cell_size: usize,
    pub orientation_bins: usize,
}

impl FeatureLayout {
    pub fn new(config: &FeatureConfig, width: usize, height: usize) -> Result<Self, AnalysisError> {
        config.validate(width, height)?;
        Ok(Self {
            width,
            height,
            histogram_bins: config.histogram_bins,
            cell_size: config.cell_size,
            orientation_bins: config.orientation_bins,
        })
    }

    pub fn cells_x(&self) -> usize {
        self.width / self.cell_size
    }

    pub fn cells_y(&self) -> usize {
        self.height / self.cell_size
    }

    pub fn histogram_len(&self) -> usize {
        self.histogram_bins
    }

    pub fn texture_len(&self) -> usize {
        LBP_CODES
    }

    pub fn gradient_len(&self) -> usize {
        self.cells_x() * self.cells_y() * self.orientation_bins
    }

    pub fn vector_len(&self) -> usize {
        self.histogram_len() + self.texture_len() + self.gradient_len()
    }

    pub fn texture_offset(&self) -> usize {
        self.histogram_len()
    }

    pub fn gradient_offset(&self) -> usize {
        self.histogram_len() + self.texture_len()
    }
}
