use bytes::Bytes;

use super::value_objects::ImageFormat;

/// An upload that passed validation. Lives for one request only.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub data: Bytes,
    /// Safe to embed in a storage path.
    pub filename: String,
    /// Extension as the client sent it, lowercased.
    pub extension: String,
    pub format: ImageFormat,
}

impl UploadedImage {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
