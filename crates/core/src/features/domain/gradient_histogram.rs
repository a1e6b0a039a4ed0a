//! Gradient-orientation histogram over a grid of cells (HOG-style).
use ndarray::ArrayView2;

use crate::features::domain::feature_config::FeatureLayout;
use crate::features::domain::feature_vector::normalize_l2;

/// Per-cell, magnitude-weighted histograms of unsigned gradient orientation.
///
/// Gradients are central finite differences on interior pixels; border
/// pixels contribute nothing. Orientations in `[0, 180)` degrees are
/// hard-binned into `layout.orientation_bins`. Cells are concatenated in
/// row-major order and the whole segment is scaled to unit L2 norm. A flat
/// image yields an all-zero segment.
pub fn gradient_histogram(gray: ArrayView2<'_, f64>, layout: &FeatureLayout) -> Vec<f64> {
    let bins = layout.orientation_bins;
    let cells_x = layout.cells_x();
    let mut hist = vec![0.0f64; layout.gradient_len()];
    let (h, w) = gray.dim();
    if h < 3 || w < 3 {
        return hist;
    }

    let bin_width = 180.0 / bins as f64;
    for r in 1..h - 1 {
        for c in 1..w - 1 {
            let gx = gray[[r, c + 1]] - gray[[r, c - 1]];
            let gy = gray[[r + 1, c]] - gray[[r - 1, c]];
            let magnitude = (gx * gx + gy * gy).sqrt();
            if magnitude == 0.0 {
                continue;
            }
            let angle = unsigned_orientation(gx, gy);
            let bin = ((angle / bin_width) as usize).min(bins - 1);
            let cell = (r / layout.cell_size) * cells_x + (c / layout.cell_size);
            hist[cell * bins + bin] += magnitude;
        }
    }

    normalize_l2(&mut hist);
    hist
}

/// Gradient direction folded into `[0, 180)` degrees.
fn unsigned_orientation(gx: f64, gy: f64) -> f64 {
    let degrees = gy.atan2(gx).to_degrees().rem_euclid(180.0);
    if degrees >= 180.0 {
        0.0
    } else {
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::feature_config::FeatureConfig;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    fn layout(size: usize, cell: usize, bins: usize) -> FeatureLayout {
        let config = FeatureConfig {
            histogram_bins: 16,
            cell_size: cell,
            orientation_bins: bins,
        };
        FeatureLayout::new(&config, size, size).unwrap()
    }

    fn l2(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[test]
    fn test_flat_image_is_all_zero() {
        let img = Array2::from_elem((16, 16), 128.0);
        let hist = gradient_histogram(img.view(), &layout(16, 8, 9));
        assert_eq!(hist.len(), 2 * 2 * 9);
        assert!(hist.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_horizontal_ramp_lands_in_zero_degree_bin() {
        let img = Array2::from_shape_fn((8, 8), |(_, c)| c as f64 * 10.0);
        let hist = gradient_histogram(img.view(), &layout(8, 8, 9));
        assert_relative_eq!(hist[0], 1.0);
        assert!(hist[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_vertical_ramp_lands_in_ninety_degree_bin() {
        let img = Array2::from_shape_fn((8, 8), |(r, _)| r as f64 * 10.0);
        let hist = gradient_histogram(img.view(), &layout(8, 8, 9));
        // 90 degrees / 20 degrees per bin = bin 4
        assert_relative_eq!(hist[4], 1.0);
    }

    #[test]
    fn test_opposite_gradients_share_a_bin() {
        let rising = Array2::from_shape_fn((8, 8), |(_, c)| c as f64 * 10.0);
        let falling = rising.mapv(|v| 200.0 - v);
        let l = layout(8, 8, 9);
        assert_eq!(
            gradient_histogram(rising.view(), &l),
            gradient_histogram(falling.view(), &l)
        );
    }

    #[test]
    fn test_edge_is_attributed_to_its_cell() {
        // vertical step edge between columns 11 and 12: only the right-hand
        // column of cells sees gradient
        let img = Array2::from_shape_fn((16, 16), |(_, c)| if c < 12 { 0.0 } else { 100.0 });
        let l = layout(16, 8, 9);
        let hist = gradient_histogram(img.view(), &l);
        let cell = |cy: usize, cx: usize| &hist[(cy * 2 + cx) * 9..(cy * 2 + cx + 1) * 9];
        assert!(cell(0, 0).iter().all(|&v| v == 0.0));
        assert!(cell(0, 1)[0] > 0.0);
        assert!(cell(1, 1)[0] > 0.0);
    }

    #[test]
    fn test_unit_norm_for_textured_input() {
        let img = Array2::from_shape_fn((16, 16), |(r, c)| ((r * r * 3 + c * 7) % 255) as f64);
        let hist = gradient_histogram(img.view(), &layout(16, 4, 6));
        assert_relative_eq!(l2(&hist), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pixel_checkerboard_has_no_central_gradient() {
        let img = Array2::from_shape_fn((8, 8), |(r, c)| if (r + c) % 2 == 0 { 255.0 } else { 0.0 });
        let hist = gradient_histogram(img.view(), &layout(8, 4, 9));
        assert!(hist.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_orientation_folding() {
        assert_relative_eq!(unsigned_orientation(1.0, 0.0), 0.0);
        assert_relative_eq!(unsigned_orientation(-1.0, 0.0), 0.0);
        assert_relative_eq!(unsigned_orientation(0.0, -1.0), 90.0);
        assert_relative_eq!(unsigned_orientation(-1.0, -1.0), 45.0);
    }
}
