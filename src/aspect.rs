//! Aspect-ratio constraint policy
//!
//! When the lock is on, one free dimension is derived from the other after
//! every resize delta. The rules are deterministic so the same pointer path
//! always produces the same rectangle.

use crate::domain::{Rect, Size};

/// Derive the constrained dimensions from a raw (unconstrained) resize.
///
/// The dimension that moved more since the start of the resize is
/// authoritative: larger absolute width change keeps `raw_width` and derives
/// the height, otherwise the height wins. Ties go to the height.
pub fn constrain_resize(start: Rect, raw_width: f32, raw_height: f32, ratio: f32) -> (f32, f32) {
    let dw = (raw_width - start.width).abs();
    let dh = (raw_height - start.height).abs();
    if dw > dh {
        (raw_width, raw_width / ratio)
    } else {
        (raw_height * ratio, raw_height)
    }
}

/// Shrink `(width, height)` proportionally until both fit in
/// `(max_width, max_height)`, keeping `ratio` exact.
pub fn fit_within(width: f32, height: f32, ratio: f32, max_width: f32, max_height: f32) -> (f32, f32) {
    let (mut w, mut h) = (width, height);
    if w > max_width {
        w = max_width;
        h = w / ratio;
    }
    if h > max_height {
        h = max_height;
        w = h * ratio;
    }
    (w, h)
}

/// Snap a rectangle to `ratio`, shrinking as needed and anchoring at the
/// rectangle's current center, then nudge back inside `bounds`.
///
/// Used when the lock is toggled on mid-session: the result is the nearest
/// ratio-respecting rectangle contained in the old footprint.
pub fn snap_to_aspect(rect: Rect, ratio: f32, bounds: Size) -> Rect {
    // Shrink one dimension so the ratio holds inside the current size
    let width = rect.width.min(rect.height * ratio);
    let height = width / ratio;
    let (width, height) = fit_within(width, height, ratio, bounds.width, bounds.height);

    let center = rect.center();
    Rect::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        width,
        height,
    )
    .clamped_inside(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn larger_width_delta_keeps_width() {
        // raw +50 in width vs +30 in height: width is authoritative
        let start = Rect::new(100.0, 100.0, 200.0, 200.0);
        let (w, h) = constrain_resize(start, 250.0, 230.0, 1.5);
        assert_eq!(w, 250.0);
        assert!((h - 250.0 / 1.5).abs() < EPS);
    }

    #[test]
    fn larger_height_delta_keeps_height() {
        let start = Rect::new(0.0, 0.0, 200.0, 200.0);
        let (w, h) = constrain_resize(start, 210.0, 280.0, 2.0);
        assert_eq!(h, 280.0);
        assert_eq!(w, 560.0);
    }

    #[test]
    fn tie_goes_to_height() {
        let start = Rect::new(0.0, 0.0, 100.0, 100.0);
        let (w, h) = constrain_resize(start, 150.0, 150.0, 2.0);
        assert_eq!(h, 150.0);
        assert_eq!(w, 300.0);
    }

    #[test]
    fn fit_within_preserves_ratio() {
        let (w, h) = fit_within(600.0, 400.0, 1.5, 300.0, 400.0);
        assert_eq!((w, h), (300.0, 200.0));
        // hitting the second bound re-derives the width
        let (w, h) = fit_within(600.0, 400.0, 1.5, 600.0, 100.0);
        assert_eq!((w, h), (150.0, 100.0));
        assert!((w / h - 1.5).abs() < EPS);
    }

    #[test]
    fn snap_shrinks_to_square_around_center() {
        let bounds = Size::new(500.0, 400.0);
        let snapped = snap_to_aspect(Rect::new(0.0, 0.0, 300.0, 100.0), 1.0, bounds);
        // 100x100 centered on (150, 50)
        assert_eq!(snapped, Rect::new(100.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn snap_respects_bounds() {
        let bounds = Size::new(200.0, 200.0);
        let snapped = snap_to_aspect(Rect::new(150.0, 150.0, 50.0, 50.0), 3.0, bounds);
        assert!(snapped.fits_inside(bounds));
        assert!((snapped.width / snapped.height - 3.0).abs() < EPS);
    }
}
