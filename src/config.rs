//! Per-session crop settings.
//!
//! Serializable configuration supplied by the host when a [`CropSession`]
//! is created. Field defaults are declared with `#[serde(default = "...")]`
//! so a partial document deserializes, and mirrored in the [`Default`] impl
//! used by the in-process API.
//!
//! [`CropSession`]: crate::session::CropSession

use serde::{Deserialize, Serialize};

use crate::domain::AspectRatio;

/// Encoded output format produced at commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG, honouring the configured quality.
    #[default]
    Jpeg,
    /// Lossless PNG.
    Png,
}

impl OutputFormat {
    /// Canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Settings for one crop session: selection policy and output encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropConfig {
    /// Aspect constraint applied to the selection.
    #[serde(default)]
    pub aspect: AspectRatio,
    /// Explicit output width in pixels; paired with `output_height`.
    #[serde(default)]
    pub output_width: Option<u32>,
    /// Explicit output height in pixels; paired with `output_width`.
    #[serde(default)]
    pub output_height: Option<u32>,
    /// Encoding quality for lossy formats, 0.0–1.0.
    #[serde(default = "default_quality")]
    pub quality: f32,
    /// Output encoding format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Clip the output to a centered inscribed circle.
    #[serde(default)]
    pub circular_mask: bool,
    /// Fraction of the smaller rendered dimension used for the default
    /// centered selection.
    #[serde(default = "default_initial_fraction")]
    pub initial_fraction: f32,
    /// Square corner hit-zone size in screen pixels.
    #[serde(default = "default_handle_hit_size")]
    pub handle_hit_size: f32,
    /// Minimum selection edge in screen pixels while resizing.
    #[serde(default = "default_min_resize_edge")]
    pub min_resize_edge: f32,
}

impl CropConfig {
    /// Explicit output size, when both dimensions are set.
    pub fn output_size(&self) -> Option<(u32, u32)> {
        self.output_width.zip(self.output_height)
    }
}

fn default_quality() -> f32 {
    0.85
}

fn default_initial_fraction() -> f32 {
    0.6
}

fn default_handle_hit_size() -> f32 {
    12.0
}

fn default_min_resize_edge() -> f32 {
    20.0
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            aspect: AspectRatio::default(),
            output_width: None,
            output_height: None,
            quality: default_quality(),
            format: OutputFormat::default(),
            circular_mask: false,
            initial_fraction: default_initial_fraction(),
            handle_hit_size: default_handle_hit_size(),
            min_resize_edge: default_min_resize_edge(),
        }
    }
}
