//! Error types for the crop engine
//!
//! Three families, matching the three boundaries where things can go wrong:
//! input validation/decoding (before a session exists), geometry validation
//! (at commit), and output encoding. Upload errors live with the uploader
//! trait in [`crate::upload`].

use thiserror::Error;

/// Failures validating or decoding an input image.
///
/// Surfaced before any session state is created, so a rejected input leaves
/// no partial engine state behind.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("input of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("image failed to decode: {0}")]
    Decode(#[from] image::ImageError),
}

/// Geometry rejected during validation or at commit time.
///
/// These are handled locally — the selection keeps its last valid value and
/// the caller retries after adjusting.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("viewport has no laid-out size yet")]
    EmptyViewport,
    #[error("crop rectangle has zero area")]
    EmptyCrop,
    #[error("crop rectangle ({x},{y} {width}x{height}) exceeds source bounds {source_width}x{source_height}")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },
}

/// Failures while producing the encoded output image
#[derive(Error, Debug)]
pub enum RasterError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
