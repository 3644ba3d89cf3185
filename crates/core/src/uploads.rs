//! Upload validation rules.
//!
//! Uploaded files are images only, capped at 5MB. The content is sniffed
//! from the leading bytes rather than trusting the client's declared MIME
//! type.

use image::ImageFormat;

/// Maximum accepted upload size in bytes (5MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted by the upload endpoint.
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Validation outcome: the sniffed format's canonical extension and MIME.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub extension: &'static str,
    pub mime: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File is too large: {size} bytes (maximum {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported file type; expected one of: png, jpeg, webp")]
    UnsupportedType,

    #[error("File is empty or not a readable image")]
    Unreadable,
}

/// Validate upload bytes against the size cap and the image allow-list.
pub fn validate_upload(bytes: &[u8], max_bytes: usize) -> Result<ImageInfo, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Unreadable);
    }
    if bytes.len() > max_bytes {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }

    let format = image::guess_format(bytes).map_err(|_| UploadError::Unreadable)?;
    match format {
        ImageFormat::Png => Ok(ImageInfo {
            extension: "png",
            mime: "image/png",
        }),
        ImageFormat::Jpeg => Ok(ImageInfo {
            extension: "jpg",
            mime: "image/jpeg",
        }),
        ImageFormat::WebP => Ok(ImageInfo {
            extension: "webp",
            mime: "image/webp",
        }),
        _ => Err(UploadError::UnsupportedType),
    }
}
