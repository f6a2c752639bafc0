//! # cropkit
//!
//! Interactive image-crop engine: the geometry, interaction and
//! rasterization core behind an image-upload flow. A host presents a decoded
//! image at some rendered size, feeds pointer events in, and gets back a
//! validated natural-space rectangle plus encoded bytes on commit.
//!
//! ```text
//! bytes → loader → CropSession (pointer events, aspect policy)
//!                      │ commit
//!                      ▼
//!             PixelRect → render::rasterize → CropOutput → Uploader
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`domain`] | Pure geometry and selection types (`Rect`, `PixelRect`, `Handle`, `AspectRatio`) |
//! | [`mapper`] | Screen ↔ natural coordinate mapping; the single scale factor |
//! | [`session`] | Selection state machine driven by pointer events |
//! | [`aspect`] | Aspect-ratio lock policy: larger-delta rule, bound re-fit, center snap |
//! | [`render`] | Rasterization: crop, Lanczos3 resample, circular mask, JPEG/PNG encode |
//! | [`loader`] | Input validation (size limit, format allow-list) and decode |
//! | [`upload`] | Uploader collaborator trait and last-write-wins commit tracking |
//! | [`config`] | Serializable per-session settings |
//! | [`error`] | Typed error families for the three failure boundaries |
//!
//! Interaction is deliberately snapshot-based: every pointer-move recomputes
//! the rectangle from the state captured at pointer-down, so event storms
//! cannot accumulate rounding or clamping drift.

pub mod aspect;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod mapper;
pub mod render;
pub mod session;
pub mod upload;

pub use config::{CropConfig, OutputFormat};
pub use domain::{AspectRatio, Handle, PixelRect, Point, Rect, Size};
pub use render::{CropOutput, RasterOptions, rasterize};
pub use session::{CropSession, PointerEvent, SessionEvent};
