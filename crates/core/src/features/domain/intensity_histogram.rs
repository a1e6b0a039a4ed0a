//! Global luminance distribution, independent of spatial layout.
use ndarray::ArrayView2;

use crate::features::domain::feature_vector::normalize_sum;

/// Histogram of intensities in `[0, 256)` over `bins` equal-width bins,
/// normalized to sum to 1.
pub fn intensity_histogram(gray: ArrayView2<'_, f64>, bins: usize) -> Vec<f64> {
    let mut hist = vec![0.0f64; bins];
    let scale = bins as f64 / 256.0;
    for &v in gray.iter() {
        hist[bin_index(v, scale, bins)] += 1.0;
    }
    normalize_sum(&mut hist);
    hist
}

fn bin_index(value: f64, scale: f64, bins: usize) -> usize {
    let idx = (value.max(0.0) * scale).floor() as usize;
    idx.min(bins - 1)
}
