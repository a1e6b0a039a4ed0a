use crate::features::domain::feature_config::FeatureLayout;

/// Concatenated (histogram, texture, gradient) descriptor for one face.
///
/// Every vector produced within a run shares the same layout, so any two can
/// be compared element-wise.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
    layout: FeatureLayout,
}

impl FeatureVector {
    pub(crate) fn new(values: Vec<f64>, layout: FeatureLayout) -> Self {
        debug_assert_eq!(values.len(), layout.vector_len());
        Self { values, layout }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn histogram(&self) -> &[f64] {
        &self.values[..self.layout.texture_offset()]
    }

    pub fn texture(&self) -> &[f64] {
        &self.values[self.layout.texture_offset()..self.layout.gradient_offset()]
    }

    pub fn gradient(&self) -> &[f64] {
        &self.values[self.layout.gradient_offset()..]
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

/// Scales `values` to sum to 1. An all-zero segment stays all-zero.
pub fn normalize_sum(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        for v in values.iter_mut() {
            *v /= total;
        }
    }
}

/// Scales `values` to unit L2 norm. An all-zero segment stays all-zero.
pub fn normalize_l2(values: &mut [f64]) {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in values.iter_mut() {
            *v /= norm;
        }
    }
}
