use std::path::Path;

use crate::shared::source_image::SourceImage;

/// Decodes one input image.
///
/// Shared by all collection workers, hence `Sync` and `&self`.
pub trait ImageReader: Send + Sync {
    /// `index` is the image's position in the batch.
    fn read(&self, path: &Path, index: usize) -> Result<SourceImage, Box<dyn std::error::Error>>;
}
