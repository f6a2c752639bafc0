//! Geometric types for crop selections and coordinate spaces

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Point in screen (rendered) coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair, used for both natural and rendered dimensions
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or non-finite
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Axis-aligned rectangle with non-negative size.
///
/// Held either in screen space or in (floating) natural space; the two are
/// never mixed in one value. Conversions go through the coordinate mapper,
/// and integer natural coordinates are the separate [`PixelRect`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two arbitrary corner points
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (min_x, max_x) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (min_y, max_y) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if this rectangle contains a point
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Translate by the given offset, keeping the size
    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Translate so the rectangle lies inside `bounds`, keeping the size.
    ///
    /// The size is assumed to fit; a rectangle larger than the bounds ends up
    /// pinned at the origin edge.
    pub fn clamped_inside(&self, bounds: Size) -> Rect {
        let x = self.x.clamp(0.0, (bounds.width - self.width).max(0.0));
        let y = self.y.clamp(0.0, (bounds.height - self.height).max(0.0));
        Rect::new(x, y, self.width, self.height)
    }

    /// Shrink edges as needed so the rectangle lies inside `bounds`.
    ///
    /// Unlike [`Rect::clamped_inside`] this cuts the rectangle instead of
    /// moving it, so a partially out-of-bounds rectangle loses area.
    pub fn intersected(&self, bounds: Size) -> Rect {
        let x = self.x.max(0.0);
        let y = self.y.max(0.0);
        let right = self.right().min(bounds.width);
        let bottom = self.bottom().min(bounds.height);
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// Check whether the rectangle lies fully inside `bounds`
    pub fn fits_inside(&self, bounds: Size) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= bounds.width
            && self.bottom() <= bounds.height
    }

    /// Scale all four components by a factor
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Integer rectangle in natural (source image) pixel space.
///
/// Only produced at commit time; interactive geometry stays in `f32` so
/// repeated rounding cannot accumulate drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Round a float-space rectangle to the nearest integer pixels.
    ///
    /// Negative coordinates truncate to zero; the caller validates the result
    /// against the source bounds before rasterizing.
    pub fn from_rect(r: Rect) -> Self {
        Self {
            x: r.x.round().max(0.0) as u32,
            y: r.y.round().max(0.0) as u32,
            width: r.width.round().max(0.0) as u32,
            height: r.height.round().max(0.0) as u32,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Validate against the source image dimensions.
    ///
    /// Zero-area rectangles and rectangles reaching past the source are
    /// rejected rather than silently clipped, so a commit either produces
    /// exactly what was selected or nothing.
    pub fn validated(self, source_width: u32, source_height: u32) -> Result<Self, GeometryError> {
        if self.area() == 0 {
            return Err(GeometryError::EmptyCrop);
        }
        let inside = self.x.checked_add(self.width).is_some_and(|r| r <= source_width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= source_height);
        if !inside {
            return Err(GeometryError::OutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                source_width,
                source_height,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_normalizes_any_direction() {
        let r = Rect::from_corners(Point::new(10.0, 20.0), Point::new(4.0, 2.0));
        assert_eq!(r, Rect::new(4.0, 2.0, 6.0, 18.0));
    }

    #[test]
    fn clamped_inside_keeps_size() {
        let bounds = Size::new(100.0, 100.0);
        let r = Rect::new(90.0, -5.0, 30.0, 30.0).clamped_inside(bounds);
        assert_eq!(r, Rect::new(70.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn intersected_cuts_area() {
        let bounds = Size::new(100.0, 100.0);
        let r = Rect::new(90.0, 90.0, 30.0, 30.0).intersected(bounds);
        assert_eq!(r, Rect::new(90.0, 90.0, 10.0, 10.0));
    }

    #[test]
    fn contains_includes_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn validated_rejects_zero_area_and_overflow() {
        let ok = PixelRect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        };
        assert!(ok.validated(10, 10).is_ok());

        let zero = PixelRect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert_eq!(zero.validated(10, 10).unwrap_err(), GeometryError::EmptyCrop);

        let out = PixelRect {
            x: 5,
            y: 0,
            width: 10,
            height: 5,
        };
        assert!(matches!(
            out.validated(10, 10),
            Err(GeometryError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn pixel_rect_rounds_to_nearest() {
        let p = PixelRect::from_rect(Rect::new(1.4, 1.6, 99.5, 200.49));
        assert_eq!(
            p,
            PixelRect {
                x: 1,
                y: 2,
                width: 100,
                height: 200
            }
        );
    }
}
