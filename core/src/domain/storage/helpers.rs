use std::sync::atomic::{AtomicU64, Ordering};

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use chrono::Utc;

use crate::domain::{
    common::generate_random_string, storage::entities::ImageSource,
    upload::helpers::sanitize_filename,
};

pub const PROCESSED_PREFIX: &str = "processed";

/// Generates names for processed images.
///
/// Names look like `processed_20250101120000123456_000042ab12cd_meal.jpg`:
/// a microsecond UTC timestamp, a per-process sequence number and a random
/// suffix, then the sanitized upload name. The sequence keeps names from one
/// process distinct even inside the same microsecond; the suffix covers
/// several processes sharing a folder.
#[derive(Debug, Default)]
pub struct ProcessedFileNamer {
    sequence: AtomicU64,
}

impl ProcessedFileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&self, sanitized_filename: &str) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let timestamp = Utc::now().format("%Y%m%d%H%M%S%6f");

        format!(
            "{PROCESSED_PREFIX}_{timestamp}_{sequence:06}{}_{sanitized_filename}",
            generate_random_string(6).to_ascii_lowercase()
        )
    }
}

/// Picks the bytes to persist: the decoded annotated image when it decodes,
/// otherwise the original upload untouched.
pub fn select_image_bytes(annotated: Option<&str>, original: &Bytes) -> (Bytes, ImageSource) {
    match annotated.and_then(decode_base64_image) {
        Some(decoded) => (Bytes::from(decoded), ImageSource::Annotated),
        None => (original.clone(), ImageSource::Original),
    }
}

fn decode_base64_image(encoded: &str) -> Option<Vec<u8>> {
    let encoded = encoded.trim();
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => encoded,
    };
    // Whitespace inside the payload is ignored, as with wrapped base64.
    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    match general_purpose::STANDARD.decode(&payload) {
        Ok(decoded) if !decoded.is_empty() => Some(decoded),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "annotated image is not valid base64, keeping the original upload");
            None
        }
    }
}

/// True when `filename` is a single path segment we could have generated.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty() && sanitize_filename(filename) == filename
}
