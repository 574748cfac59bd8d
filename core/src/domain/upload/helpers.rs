use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    common::entities::app_errors::CoreError,
    upload::{
        entities::UploadedImage,
        value_objects::{ImageFormat, MAX_IMAGE_SIZE, RawUpload, extension_of},
    },
};

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex is valid"));

/// Reduces a client supplied filename to `[A-Za-z0-9_.-]`.
///
/// Path separators become word breaks, whitespace runs become a single `_`,
/// anything else outside the allowed set is dropped and leading/trailing
/// `.`/`_` are trimmed, so `../../etc/passwd` ends up as `etc_passwd`.
/// The result can be empty.
pub fn sanitize_filename(filename: &str) -> String {
    let separated = filename.replace(['/', '\\'], " ");
    let joined = separated.split_whitespace().collect::<Vec<_>>().join("_");

    UNSAFE_FILENAME_CHARS
        .replace_all(&joined, "")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Checks an upload in order: present, named, allowed extension, size.
pub fn validate_upload(upload: Option<RawUpload>) -> Result<UploadedImage, CoreError> {
    let upload =
        upload.ok_or_else(|| CoreError::MissingInput("No image file provided".to_string()))?;

    let file_name = upload
        .file_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CoreError::MissingInput("Empty filename".to_string()))?;

    let extension = extension_of(&file_name)
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| {
            CoreError::UnsupportedFormat("Unsupported file format. Use PNG/JPG.".to_string())
        })?;

    let format = ImageFormat::from_extension(&extension).ok_or_else(|| {
        CoreError::UnsupportedFormat("Unsupported file format. Use PNG/JPG.".to_string())
    })?;

    if upload.data.len() > MAX_IMAGE_SIZE {
        return Err(CoreError::FileTooLarge {
            size: upload.data.len(),
            limit: MAX_IMAGE_SIZE,
        });
    }

    let mut filename = sanitize_filename(&file_name);
    if filename.is_empty() {
        filename = format!("upload.{extension}");
    } else if ImageFormat::from_filename(&filename).is_none() {
        filename = format!("{filename}.{extension}");
    }

    Ok(UploadedImage {
        data: upload.data,
        filename,
        extension,
        format,
    })
}
