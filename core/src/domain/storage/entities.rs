use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which bytes ended up on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Annotated,
    Original,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersistedImage {
    pub filename: String,
    pub source: ImageSource,
    pub size_bytes: usize,
}

/// A stored image read back for serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub filename: String,
    pub content_type: &'static str,
    pub data: Bytes,
}
