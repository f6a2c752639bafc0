//! Pointer input and handle hit-testing
//!
//! Pointer events arrive as plain data in screen coordinates; the session
//! owns all interpretation, so any host (canvas, native toolkit, test
//! script) drives the same state machine.

use crate::domain::{Handle, Point, Rect};

/// Pointer event delivered by the host, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down(Point),
    /// Pointer moved while pressed
    Move(Point),
    /// Primary button released
    Up,
    /// Pointer left the viewport; treated like a release
    Leave,
}

/// Interaction phase of the session state machine.
///
/// `Dragging` and `Resizing` carry a snapshot of the rectangle and pointer
/// at the moment the interaction started; every pointer-move recomputes from
/// that snapshot rather than from the previous frame, so rapid event streams
/// cannot accumulate rounding or clamping drift.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    /// No button held
    #[default]
    Idle,
    /// Whole-rectangle translation
    Dragging { origin: Point, start: Rect },
    /// Corner resize; `anchor` is the fixed opposite corner
    Resizing {
        handle: Handle,
        anchor: Point,
        start: Rect,
        /// Minimum edge length while this resize is live (smaller for a
        /// fresh draw growing from a point than for a handle grab)
        min_edge: f32,
    },
}

impl DragPhase {
    /// True while a drag or resize is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, DragPhase::Idle)
    }
}

/// Find the corner handle whose square hit zone contains `p`, if any
pub fn handle_at(p: Point, rect: Rect, hit_size: f32) -> Option<Handle> {
    let half = hit_size / 2.0;
    Handle::ALL.into_iter().find(|handle| {
        let corner = handle.corner(rect);
        (p.x - corner.x).abs() <= half && (p.y - corner.y).abs() <= half
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_hit_inside_zone_only() {
        let rect = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert_eq!(
            handle_at(Point::new(104.0, 96.0), rect, 12.0),
            Some(Handle::Nw)
        );
        assert_eq!(
            handle_at(Point::new(300.0, 300.0), rect, 12.0),
            Some(Handle::Se)
        );
        assert_eq!(
            handle_at(Point::new(296.0, 105.0), rect, 12.0),
            Some(Handle::Ne)
        );
        assert_eq!(
            handle_at(Point::new(100.0, 294.0), rect, 12.0),
            Some(Handle::Sw)
        );
        // 7px off a corner is outside a 12x12 zone
        assert_eq!(handle_at(Point::new(107.0, 100.0), rect, 12.0), None);
        // rectangle interior is not a handle
        assert_eq!(handle_at(Point::new(200.0, 200.0), rect, 12.0), None);
    }
}
