use ndarray::ArrayView2;

use crate::aggregation::domain::average_face::AverageFace;
use crate::features::domain::feature_config::{FeatureConfig, FeatureLayout};
use crate::features::domain::feature_vector::FeatureVector;
use crate::features::domain::gradient_histogram::gradient_histogram;
use crate::features::domain::intensity_histogram::intensity_histogram;
use crate::features::domain::local_binary_pattern::lbp_histogram;
use crate::normalization::domain::face_sample::FaceSample;
use crate::shared::error::AnalysisError;

/// Computes the three-segment descriptor for canonical-resolution faces.
///
/// The layout is derived once from the configuration and canonical
/// resolution, so every vector from one extractor has the same length and
/// segment boundaries. Pure and `Sync`: one extractor can serve all
/// workers.
#[derive(Clone, Debug)]
pub struct FeatureExtractor {
    layout: FeatureLayout,
}

impl FeatureExtractor {
    pub fn new(config: &FeatureConfig, width: u32, height: u32) -> Result<Self, AnalysisError> {
        Ok(Self {
            layout: FeatureLayout::new(config, width as usize, height as usize)?,
        })
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    /// Fails fast on an input that is not at the canonical resolution.
    pub fn extract(&self, gray: ArrayView2<'_, f64>) -> Result<FeatureVector, AnalysisError> {
        let expected = (self.layout.height, self.layout.width);
        if gray.dim() != expected {
            return Err(AnalysisError::shape_mismatch(
                "feature input",
                expected,
                gray.dim(),
            ));
        }

        let mut values = Vec::with_capacity(self.layout.vector_len());
        values.extend(intensity_histogram(gray, self.layout.histogram_bins));
        values.extend(lbp_histogram(gray));
        values.extend(gradient_histogram(gray, &self.layout));
        Ok(FeatureVector::new(values, self.layout))
    }

    pub fn extract_sample(&self, sample: &FaceSample) -> Result<FeatureVector, AnalysisError> {
        let gray = sample.gray().mapv(f64::from);
        self.extract(gray.view())
    }

    pub fn extract_average(&self, average: &AverageFace) -> Result<FeatureVector, AnalysisError> {
        self.extract(average.gray())
    }
}
