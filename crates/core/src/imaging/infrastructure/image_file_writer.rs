use std::path::Path;

use image::imageops::FilterType;

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Writes a single frame to an image file using the `image` crate.
///
/// Accepts gray (1-channel) and RGB (3-channel) frames; the format follows
/// the file extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a frame's pixels without converting them.
fn to_dynamic_image(frame: &Frame) -> Result<image::DynamicImage, Box<dyn std::error::Error>> {
    let (w, h) = (frame.width(), frame.height());
    let pixels = frame.data().to_vec();
    let img = match frame.channels() {
        1 => image::GrayImage::from_raw(w, h, pixels).map(image::DynamicImage::ImageLuma8),
        3 => image::RgbImage::from_raw(w, h, pixels).map(image::DynamicImage::ImageRgb8),
        c => return Err(format!("cannot encode a {c}-channel frame").into()),
    };
    img.ok_or_else(|| "frame buffer does not match its dimensions".into())
}

impl ImageWriter for ImageFileWriter {
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        resize_to: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = to_dynamic_image(frame)?;
        let img = match resize_to {
            Some((w, h)) if (w, h) != (frame.width(), frame.height()) => {
                img.resize_exact(w, h, FilterType::CatmullRom)
            }
            _ => img,
        };

        img.save(path)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let data = (0..width * height).flat_map(|_| rgb).collect();
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_write_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.png");
        ImageFileWriter::new()
            .write(&path, &make_frame(10, 8, [50, 100, 200]), None)
            .unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_roundtrip_preserves_rgb_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &make_frame(50, 50, [50, 100, 200]), None)
            .unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (50, 50));
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 200]);
    }

    #[test]
    fn test_writes_gray_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let frame = Frame::new(vec![77; 16], 4, 4, 1, 0);
        ImageFileWriter::new().write(&path, &frame, None).unwrap();
        let img = image::open(&path).unwrap().to_luma8();
        assert_eq!(img.get_pixel(3, 3).0, [77]);
    }

    #[test]
    fn test_write_with_resize() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thumb.png");
        ImageFileWriter::new()
            .write(&path, &make_frame(200, 200, [128, 128, 128]), Some((64, 32)))
            .unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (64, 32));
    }

    #[test]
    fn test_unsupported_channels_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(vec![0; 8], 2, 2, 2, 0);
        assert!(ImageFileWriter::new()
            .write(&dir.path().join("x.png"), &frame, None)
            .is_err());
    }
}
