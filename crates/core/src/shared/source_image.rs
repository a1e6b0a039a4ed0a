use crate::shared::frame::Frame;

/// A decoded input image and where it came from.
///
/// `id` is the identifier reported in results (the file name for images read
/// from disk); the batch position lives in the frame's index.
#[derive(Clone, Debug)]
pub struct SourceImage {
    id: String,
    frame: Frame,
}

impl SourceImage {
    pub fn new(id: impl Into<String>, frame: Frame) -> Self {
        Self {
            id: id.into(),
            frame,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> usize {
        self.frame.index()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}
