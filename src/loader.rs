//! Input validation and decoding
//!
//! The boundary between raw uploaded bytes and a crop session. Everything
//! here runs before any session state exists, so a rejected input leaves
//! nothing behind.

use image::{DynamicImage, ImageFormat};

use crate::error::InputError;

/// Limits applied to incoming image bytes before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadLimits {
    /// Maximum accepted input size in bytes
    pub max_bytes: usize,
    /// Formats accepted for decoding
    pub allowed_formats: Vec<ImageFormat>,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            // matches the usual upload-form ceiling
            max_bytes: 10 * 1024 * 1024,
            allowed_formats: vec![ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP],
        }
    }
}

/// Validate and decode image bytes.
///
/// Checks the size limit and sniffs the format against the allow-list
/// before handing the bytes to the decoder.
pub fn decode_image(bytes: &[u8], limits: &LoadLimits) -> Result<DynamicImage, InputError> {
    if bytes.len() > limits.max_bytes {
        return Err(InputError::TooLarge {
            size: bytes.len(),
            limit: limits.max_bytes,
        });
    }

    let format = image::guess_format(bytes).map_err(|_| InputError::UnsupportedFormat)?;
    if !limits.allowed_formats.contains(&format) {
        log::warn!("rejecting upload with format {format:?}");
        return Err(InputError::UnsupportedFormat);
    }

    Ok(image::load_from_memory_with_format(bytes, format)?)
}

/// Async wrapper over [`decode_image`].
///
/// Decoding a large photo is CPU-bound, so it runs on the blocking pool;
/// the returned future resolves exactly once with the image or the error.
pub async fn load_image(bytes: Vec<u8>, limits: LoadLimits) -> Result<DynamicImage, InputError> {
    tokio::task::spawn_blocking(move || decode_image(&bytes, &limits))
        .await
        .expect("image decode task panicked")
}
