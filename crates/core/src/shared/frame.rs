use ndarray::{Array2, ArrayView3};

use crate::shared::region::Region;

/// A decoded raster: contiguous 8-bit pixels in row-major order.
///
/// Holds either 1 (gray) or 3 (RGB) channels. Format conversion happens at
/// I/O boundaries only; the domain layer works on this type and on the
/// `ndarray` views it exposes.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of the source image within the batch.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the pixels covered by `region`.
    ///
    /// The region must already lie inside the frame; see [`Region::clamp_to`].
    pub fn crop(&self, region: &Region) -> Frame {
        let x1 = region.x as usize;
        let y1 = region.y as usize;
        let w = region.width as usize;
        let h = region.height as usize;
        let channels = self.channels as usize;
        let stride = self.width as usize * channels;

        let mut data = Vec::with_capacity(w * h * channels);
        for row in y1..y1 + h {
            let start = row * stride + x1 * channels;
            data.extend_from_slice(&self.data[start..start + w * channels]);
        }
        Frame::new(data, w as u32, h as u32, self.channels, self.index)
    }

    /// Single-channel luma derivative, shaped `(height, width)`.
    pub fn to_gray(&self) -> Array2<u8> {
        let shape = (self.height as usize, self.width as usize);
        if self.channels == 1 {
            return Array2::from_shape_vec(shape, self.data.clone())
                .expect("Frame data length must match dimensions");
        }
        let rgb = image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Frame data length must match dimensions");
        let luma = image::DynamicImage::ImageRgb8(rgb).to_luma8().into_raw();
        Array2::from_shape_vec(shape, luma).expect("luma buffer must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
