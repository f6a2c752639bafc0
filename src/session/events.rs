//! Domain events emitted by a crop session
//!
//! Geometry code never talks to telemetry directly. Mutating session calls
//! return one of these events and the host decides whether to forward it
//! (analytics, preview invalidation, autosave) or drop it.

use serde::Serialize;

use crate::domain::{PixelRect, Rect};

/// Discrete state change produced by a session mutation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SessionEvent {
    /// The selection rectangle changed (screen space)
    SelectionChanged(Rect),
    /// The selection was re-initialized to the centered default
    SelectionReset(Rect),
    /// A crop was committed; carries the final natural-space rectangle
    CropCommitted(PixelRect),
}
