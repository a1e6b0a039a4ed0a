use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::shared::frame::Frame;

/// Where a face sample came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub image_id: String,
    pub image_index: usize,
    pub detection_index: usize,
}

impl Provenance {
    pub fn new(image_id: impl Into<String>, image_index: usize, detection_index: usize) -> Self {
        Self {
            image_id: image_id.into(),
            image_index,
            detection_index,
        }
    }

    /// Processing-order key: source image order, then detection index.
    pub fn order_key(&self) -> (usize, usize) {
        (self.image_index, self.detection_index)
    }
}

/// A face cropped and stretched to the canonical resolution.
///
/// Owns both the display buffer (color or gray, per configuration) and the
/// grayscale derivative used for feature extraction. Immutable after
/// creation.
#[derive(Clone, Debug)]
pub struct FaceSample {
    provenance: Provenance,
    display: Frame,
    gray: Array2<u8>,
}

impl FaceSample {
    pub fn new(provenance: Provenance, display: Frame, gray: Array2<u8>) -> Self {
        debug_assert_eq!(
            gray.dim(),
            (display.height() as usize, display.width() as usize),
            "gray derivative must match display dimensions"
        );
        Self {
            provenance,
            display,
            gray,
        }
    }

    /// Builds a sample whose display buffer is the gray buffer itself.
    pub fn from_gray(provenance: Provenance, gray: Array2<u8>) -> Self {
        let (h, w) = gray.dim();
        let display = Frame::new(
            gray.iter().copied().collect(),
            w as u32,
            h as u32,
            1,
            provenance.image_index,
        );
        Self::new(provenance, display, gray)
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn display(&self) -> &Frame {
        &self.display
    }

    pub fn gray(&self) -> &Array2<u8> {
        &self.gray
    }

    pub fn width(&self) -> u32 {
        self.display.width()
    }

    pub fn height(&self) -> u32 {
        self.display.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_gray_builds_single_channel_display() {
        let gray = Array2::from_shape_fn((2, 3), |(r, c)| (r * 3 + c) as u8);
        let sample = FaceSample::from_gray(Provenance::new("a.png", 4, 1), gray.clone());
        assert_eq!(sample.width(), 3);
        assert_eq!(sample.height(), 2);
        assert_eq!(sample.display().channels(), 1);
        assert_eq!(sample.display().index(), 4);
        assert_eq!(sample.display().data(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(sample.gray(), &gray);
    }

    #[test]
    fn test_order_key_sorts_by_image_then_detection() {
        let mut keys = vec![
            Provenance::new("b", 1, 0).order_key(),
            Provenance::new("a", 0, 2).order_key(),
            Provenance::new("a", 0, 1).order_key(),
        ];
        keys.sort();
        assert_eq!(keys, vec![(0, 1), (0, 2), (1, 0)]);
    }
}
