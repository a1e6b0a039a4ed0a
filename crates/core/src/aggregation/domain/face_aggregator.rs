use ndarray::{Array2, Array3, Zip};

use crate::aggregation::domain::average_face::AverageFace;
use crate::normalization::domain::face_sample::FaceSample;
use crate::shared::error::AnalysisError;

/// Running pixel-wise sum over a stream of face samples.
///
/// Samples are accepted one at a time, so the batch never has to be held in
/// memory. Sums are kept in `f64` to avoid overflow and precision loss on
/// large batches. Partial aggregators (e.g. one per worker) combine with
/// [`FaceAggregator::merge`]. [`FaceAggregator::finalize`] consumes the
/// aggregator, so the mean is taken exactly once.
#[derive(Clone, Debug)]
pub struct FaceAggregator {
    display_sum: Array3<f64>,
    gray_sum: Array2<f64>,
    count: usize,
}

impl FaceAggregator {
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        let (h, w) = (height as usize, width as usize);
        Self {
            display_sum: Array3::zeros((h, w, channels as usize)),
            gray_sum: Array2::zeros((h, w)),
            count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn accumulate(&mut self, sample: &FaceSample) -> Result<(), AnalysisError> {
        let display = sample.display().as_ndarray();
        if display.dim() != self.display_sum.dim() {
            return Err(AnalysisError::shape_mismatch(
                "face sample",
                self.display_sum.dim(),
                display.dim(),
            ));
        }
        if sample.gray().dim() != self.gray_sum.dim() {
            return Err(AnalysisError::shape_mismatch(
                "grayscale sample",
                self.gray_sum.dim(),
                sample.gray().dim(),
            ));
        }

        Zip::from(&mut self.display_sum)
            .and(&display)
            .for_each(|sum, &v| *sum += v as f64);
        Zip::from(&mut self.gray_sum)
            .and(sample.gray())
            .for_each(|sum, &v| *sum += v as f64);
        self.count += 1;
        Ok(())
    }

    /// Adds another aggregator's partial sums into this one.
    pub fn merge(&mut self, other: &FaceAggregator) -> Result<(), AnalysisError> {
        if other.display_sum.dim() != self.display_sum.dim() {
            return Err(AnalysisError::shape_mismatch(
                "partial aggregate",
                self.display_sum.dim(),
                other.display_sum.dim(),
            ));
        }
        self.display_sum += &other.display_sum;
        self.gray_sum += &other.gray_sum;
        self.count += other.count;
        Ok(())
    }

    pub fn finalize(self) -> Result<AverageFace, AnalysisError> {
        if self.count == 0 {
            return Err(AnalysisError::EmptyBatch);
        }
        let n = self.count as f64;
        Ok(AverageFace::new(
            self.display_sum / n,
            self.gray_sum / n,
            self.count,
        ))
    }
}
