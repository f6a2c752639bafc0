//! Crop output rendering
//!
//! Rasterization of the committed natural-space rectangle into encoded
//! bytes ready for upload.

pub mod raster;

pub use raster::{CropOutput, RasterOptions, rasterize};
