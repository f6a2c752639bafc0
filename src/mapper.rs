//! Screen/natural coordinate mapping
//!
//! One scale factor is the single source of truth for converting between the
//! image's intrinsic pixel grid and the rendered on-screen area. Everything
//! downstream (selection state, rasterizer input) goes through it.

use crate::domain::{Rect, Size};
use crate::error::GeometryError;

/// Maps between natural (intrinsic) and rendered (on-screen) pixel space.
///
/// `rendered` is the visible image area, not the surrounding container — with
/// a letterboxed "contain" layout the caller derives it via [`fit_contain`]
/// so the width and height ratios stay identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    natural: Size,
    rendered: Size,
}

impl CoordinateMapper {
    /// Create a mapper for an image of `natural` size shown at `rendered` size.
    ///
    /// Rejects zero/empty sizes: before layout has happened there is no valid
    /// scale factor, and the caller defers instead of propagating a 0 or
    /// infinite scale.
    pub fn new(natural: Size, rendered: Size) -> Result<Self, GeometryError> {
        if natural.is_degenerate() || rendered.is_degenerate() {
            return Err(GeometryError::EmptyViewport);
        }
        Ok(Self { natural, rendered })
    }

    pub fn natural(&self) -> Size {
        self.natural
    }

    pub fn rendered(&self) -> Size {
        self.rendered
    }

    /// Update the rendered size after a layout change.
    ///
    /// A zero-sized viewport (mid-layout) is rejected and the previous scale
    /// stays in effect.
    pub fn set_rendered(&mut self, rendered: Size) -> Result<(), GeometryError> {
        if rendered.is_degenerate() {
            log::warn!("ignoring degenerate viewport {rendered:?}");
            return Err(GeometryError::EmptyViewport);
        }
        self.rendered = rendered;
        Ok(())
    }

    /// Natural pixels per screen pixel. Always positive and finite.
    pub fn scale_factor(&self) -> f32 {
        self.natural.width / self.rendered.width
    }

    /// Screen-space rectangle → natural (float) space
    pub fn to_natural(&self, screen: Rect) -> Rect {
        screen.scaled(self.scale_factor())
    }

    /// Natural (float) space rectangle → screen space
    pub fn to_screen(&self, natural: Rect) -> Rect {
        natural.scaled(1.0 / self.scale_factor())
    }
}

/// Visible image area when an image of `natural` size is laid out inside
/// `container` under "contain" fit (scaled to fit entirely, letterboxed).
///
/// Never upscales past the smaller of the two constraints; the result keeps
/// the natural aspect ratio so width and height share one scale.
pub fn fit_contain(natural: Size, container: Size) -> Size {
    let scale = (container.width / natural.width).min(container.height / natural.height);
    Size::new(natural.width * scale, natural.height * scale)
}
