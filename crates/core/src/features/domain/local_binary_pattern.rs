//! Micro-texture descriptor, invariant to monotonic brightness changes.
use ndarray::ArrayView2;

use crate::features::domain::feature_vector::normalize_sum;
use crate::shared::constants::LBP_CODES;

/// Neighbour offsets `(dr, dc)`, clockwise from the top-left. The first
/// neighbour becomes the most significant bit.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// 8-bit code for the pixel at `(r, c)`: a bit is set when the neighbour is
/// at least as bright as the centre. `(r, c)` must not lie on the border.
pub fn lbp_code(gray: ArrayView2<'_, f64>, r: usize, c: usize) -> u8 {
    let centre = gray[[r, c]];
    NEIGHBOURS.iter().fold(0u8, |code, &(dr, dc)| {
        let neighbour = gray[[(r as isize + dr) as usize, (c as isize + dc) as usize]];
        (code << 1) | u8::from(neighbour >= centre)
    })
}

/// Histogram of LBP codes over interior pixels (1-pixel border excluded),
/// normalized to sum to 1.
pub fn lbp_histogram(gray: ArrayView2<'_, f64>) -> Vec<f64> {
    let mut hist = vec![0.0f64; LBP_CODES];
    let (h, w) = gray.dim();
    if h < 3 || w < 3 {
        return hist;
    }
    for r in 1..h - 1 {
        for c in 1..w - 1 {
            hist[lbp_code(gray, r, c) as usize] += 1.0;
        }
    }
    normalize_sum(&mut hist);
    hist
}
