//! Selection handle and aspect-ratio types

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};

/// Corner handle being dragged during a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    /// North-West corner
    Nw,
    /// North-East corner
    Ne,
    /// South-West corner
    Sw,
    /// South-East corner
    Se,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// The corner this handle sits on
    pub fn corner(self, rect: Rect) -> Point {
        match self {
            Handle::Nw => Point::new(rect.x, rect.y),
            Handle::Ne => Point::new(rect.right(), rect.y),
            Handle::Sw => Point::new(rect.x, rect.bottom()),
            Handle::Se => Point::new(rect.right(), rect.bottom()),
        }
    }

    /// The diagonally opposite corner, fixed during a resize
    pub fn anchor(self, rect: Rect) -> Point {
        match self {
            Handle::Nw => Point::new(rect.right(), rect.bottom()),
            Handle::Ne => Point::new(rect.x, rect.bottom()),
            Handle::Sw => Point::new(rect.right(), rect.y),
            Handle::Se => Point::new(rect.x, rect.y),
        }
    }
}

/// Width/height constraint applied while resizing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Unconstrained
    #[default]
    Free,
    /// Fixed width/height ratio, must be positive and finite
    Fixed(f32),
}

impl AspectRatio {
    /// Fixed ratio from integer width:height parts (e.g. 16:9)
    pub fn of(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            AspectRatio::Free
        } else {
            AspectRatio::Fixed(width as f32 / height as f32)
        }
    }

    /// The ratio when fixed and valid, `None` when free
    pub fn ratio(self) -> Option<f32> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Fixed(r) if r.is_finite() && r > 0.0 => Some(r),
            // Garbage ratios (from deserialized config) degrade to free
            AspectRatio::Fixed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_is_opposite_corner() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(Handle::Se.anchor(r), Point::new(10.0, 20.0));
        assert_eq!(Handle::Nw.anchor(r), Point::new(110.0, 70.0));
        assert_eq!(Handle::Ne.anchor(r), Point::new(10.0, 70.0));
        assert_eq!(Handle::Sw.anchor(r), Point::new(110.0, 20.0));
    }

    #[test]
    fn invalid_fixed_ratio_degrades_to_free() {
        assert_eq!(AspectRatio::Fixed(0.0).ratio(), None);
        assert_eq!(AspectRatio::Fixed(f32::NAN).ratio(), None);
        assert_eq!(AspectRatio::of(4, 0), AspectRatio::Free);
        assert_eq!(AspectRatio::of(3, 2).ratio(), Some(1.5));
    }
}
