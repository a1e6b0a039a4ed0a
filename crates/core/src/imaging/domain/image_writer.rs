use std::path::Path;

use crate::shared::frame::Frame;

/// Encodes gray or RGB frames to image files; the format follows the
/// path's extension.
pub trait ImageWriter: Send {
    /// `resize_to` rescales the saved image; `None` keeps the frame's size.
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        resize_to: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
