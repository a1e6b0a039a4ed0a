use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use crate::shared::frame::Frame;

/// Pixel-wise arithmetic mean over every accepted face sample.
///
/// Produced once by [`FaceAggregator::finalize`] and immutable afterwards.
///
/// [`FaceAggregator::finalize`]: crate::aggregation::domain::face_aggregator::FaceAggregator::finalize
#[derive(Clone, Debug)]
pub struct AverageFace {
    display: Array3<f64>,
    gray: Array2<f64>,
    count: usize,
}

impl AverageFace {
    pub(crate) fn new(display: Array3<f64>, gray: Array2<f64>, count: usize) -> Self {
        Self {
            display,
            gray,
            count,
        }
    }

    /// Mean display buffer, shaped `(height, width, channels)`.
    pub fn display(&self) -> ArrayView3<'_, f64> {
        self.display.view()
    }

    /// Mean grayscale derivative, shaped `(height, width)`.
    pub fn gray(&self) -> ArrayView2<'_, f64> {
        self.gray.view()
    }

    /// Number of samples that contributed.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn width(&self) -> u32 {
        self.gray.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.gray.nrows() as u32
    }

    /// Rounds the mean display buffer to 8-bit pixels for output.
    pub fn to_frame(&self) -> Frame {
        let (h, w, c) = self.display.dim();
        let data = self
            .display
            .iter()
            .map(|&v| v.round().clamp(0.0, 255.0) as u8)
            .collect();
        Frame::new(data, w as u32, h as u32, c as u8, 0)
    }
}
