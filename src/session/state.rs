//! Crop session state
//!
//! Owns the selection rectangle and the interaction state machine. All
//! mutation is synchronous and pure apart from the returned events; the
//! source bitmap itself stays with the caller until rasterization.

use crate::aspect;
use crate::config::CropConfig;
use crate::domain::{AspectRatio, Handle, PixelRect, Point, Rect, Size};
use crate::error::GeometryError;
use crate::mapper::CoordinateMapper;

use super::events::SessionEvent;
use super::pointer::{DragPhase, PointerEvent, handle_at};

/// Minimum selection edge in screen pixels for a committed rectangle
const MIN_EDGE: f32 = 1.0;

/// Interactive crop session over one decoded image.
///
/// Created once the image has decoded and the viewport has laid out;
/// destroyed when the crop is applied or cancelled.
#[derive(Debug, Clone)]
pub struct CropSession {
    mapper: CoordinateMapper,
    config: CropConfig,
    selection: Rect,
    phase: DragPhase,
}

impl CropSession {
    /// Start a session for an image of `natural` size rendered at `rendered`
    /// size, with a centered default selection.
    pub fn new(natural: Size, rendered: Size, config: CropConfig) -> Result<Self, GeometryError> {
        let mapper = CoordinateMapper::new(natural, rendered)?;
        let mut session = Self {
            mapper,
            config,
            selection: Rect::default(),
            phase: DragPhase::Idle,
        };
        session.selection = session.default_selection();
        Ok(session)
    }

    /// Current selection in screen space
    pub fn selection(&self) -> Rect {
        self.selection
    }

    /// Current selection mapped to natural (float) space, bounded by the
    /// source image
    pub fn natural_selection(&self) -> Rect {
        self.mapper
            .to_natural(self.selection)
            .intersected(self.mapper.natural())
    }

    pub fn aspect(&self) -> AspectRatio {
        self.config.aspect
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// True while a drag or resize is in progress
    pub fn is_interacting(&self) -> bool {
        self.phase.is_active()
    }

    /// Re-initialize the selection to the centered default
    pub fn reset(&mut self) -> SessionEvent {
        self.phase = DragPhase::Idle;
        self.selection = self.default_selection();
        SessionEvent::SelectionReset(self.selection)
    }

    /// Replace the selection wholesale (e.g. a host restoring saved state).
    ///
    /// The rectangle is clamped into bounds, padded to the 1 px minimum and
    /// re-derived under a fixed aspect before it is stored.
    pub fn set_selection(&mut self, rect: Rect) -> SessionEvent {
        self.selection = self.sanitize(rect);
        SessionEvent::SelectionChanged(self.selection)
    }

    /// Change the aspect constraint mid-session.
    ///
    /// Turning the lock on snaps the current rectangle to the nearest
    /// ratio-respecting rectangle, shrinking around its center.
    pub fn set_aspect(&mut self, aspect: AspectRatio) -> Option<SessionEvent> {
        self.config.aspect = aspect;
        let ratio = aspect.ratio()?;
        let snapped = aspect::snap_to_aspect(self.selection, ratio, self.mapper.rendered());
        if snapped == self.selection {
            return None;
        }
        self.selection = snapped;
        Some(SessionEvent::SelectionChanged(snapped))
    }

    /// React to a viewport layout change.
    ///
    /// The selection is rescaled so it still covers the same natural-space
    /// region; an in-flight drag is abandoned since its origin coordinates
    /// belong to the old layout.
    pub fn set_rendered(&mut self, rendered: Size) -> Result<SessionEvent, GeometryError> {
        let old = self.mapper.rendered();
        self.mapper.set_rendered(rendered)?;
        self.phase = DragPhase::Idle;
        let factor = rendered.width / old.width;
        self.selection = self.sanitize(self.selection.scaled(factor));
        Ok(SessionEvent::SelectionChanged(self.selection))
    }

    /// Feed one pointer event through the state machine.
    ///
    /// Returns an event when the selection actually changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SessionEvent> {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up | PointerEvent::Leave => {
                // the last move already stored the final rectangle; release
                // just clears the bookkeeping
                self.phase = DragPhase::Idle;
                None
            }
        }
    }

    /// Validate the selection and produce the integer natural-space crop.
    ///
    /// A degenerate rectangle is rejected and the selection stays at its
    /// last valid value.
    pub fn commit(&self) -> Result<(PixelRect, SessionEvent), GeometryError> {
        let natural = self.mapper.natural();
        let crop = PixelRect::from_rect(self.natural_selection())
            .validated(natural.width as u32, natural.height as u32)?;
        log::debug!("committed crop {crop:?}");
        Ok((crop, SessionEvent::CropCommitted(crop)))
    }

    fn pointer_down(&mut self, p: Point) -> Option<SessionEvent> {
        let bounds = self.mapper.rendered();
        let p = Point::new(p.x.clamp(0.0, bounds.width), p.y.clamp(0.0, bounds.height));

        if let Some(handle) = handle_at(p, self.selection, self.config.handle_hit_size) {
            self.phase = DragPhase::Resizing {
                handle,
                anchor: handle.anchor(self.selection),
                start: self.selection,
                min_edge: self.config.min_resize_edge,
            };
            return None;
        }

        if self.selection.contains(p) {
            self.phase = DragPhase::Dragging {
                origin: p,
                start: self.selection,
            };
            return None;
        }

        // Pointer-down outside the selection draws a fresh rectangle growing
        // from that point, south-east corner following the pointer
        let start = Rect::new(p.x, p.y, 0.0, 0.0);
        self.phase = DragPhase::Resizing {
            handle: Handle::Se,
            anchor: p,
            start,
            min_edge: MIN_EDGE,
        };
        self.selection = Rect::new(p.x, p.y, MIN_EDGE, MIN_EDGE).clamped_inside(bounds);
        Some(SessionEvent::SelectionChanged(self.selection))
    }

    fn pointer_move(&mut self, p: Point) -> Option<SessionEvent> {
        let next = match self.phase {
            DragPhase::Idle => return None,
            DragPhase::Dragging { origin, start } => {
                let bounds = self.mapper.rendered();
                start
                    .translated(p.x - origin.x, p.y - origin.y)
                    .clamped_inside(bounds)
            }
            DragPhase::Resizing {
                handle,
                anchor,
                start,
                min_edge,
            } => self.resized(handle, anchor, start, min_edge, p),
        };
        if next == self.selection {
            return None;
        }
        self.selection = next;
        Some(SessionEvent::SelectionChanged(next))
    }

    /// Recompute the rectangle for a resize from its start-of-drag snapshot
    fn resized(&self, handle: Handle, anchor: Point, start: Rect, min_edge: f32, p: Point) -> Rect {
        let bounds = self.mapper.rendered();
        let px = p.x.clamp(0.0, bounds.width);
        let py = p.y.clamp(0.0, bounds.height);

        // raw extent measured from the fixed anchor toward the moving corner
        let raw_width = match handle {
            Handle::Nw | Handle::Sw => anchor.x - px,
            Handle::Ne | Handle::Se => px - anchor.x,
        };
        let raw_height = match handle {
            Handle::Nw | Handle::Ne => anchor.y - py,
            Handle::Sw | Handle::Se => py - anchor.y,
        };

        // space available on the moving side of the anchor
        let avail_width = match handle {
            Handle::Nw | Handle::Sw => anchor.x,
            Handle::Ne | Handle::Se => bounds.width - anchor.x,
        };
        let avail_height = match handle {
            Handle::Nw | Handle::Ne => anchor.y,
            Handle::Sw | Handle::Se => bounds.height - anchor.y,
        };

        // container bound wins over the minimum when the anchor sits near an
        // edge, hence max-then-min rather than clamp
        let mut width = raw_width.max(min_edge).min(avail_width);
        let mut height = raw_height.max(min_edge).min(avail_height);

        if let Some(ratio) = self.config.aspect.ratio() {
            let (w, h) = aspect::constrain_resize(start, width, height, ratio);
            let (w, h) = aspect::fit_within(w, h, ratio, avail_width, avail_height);
            width = w;
            height = h;
        }

        match handle {
            Handle::Se => Rect::new(anchor.x, anchor.y, width, height),
            Handle::Ne => Rect::new(anchor.x, anchor.y - height, width, height),
            Handle::Sw => Rect::new(anchor.x - width, anchor.y, width, height),
            Handle::Nw => Rect::new(anchor.x - width, anchor.y - height, width, height),
        }
    }

    /// Centered default: a fraction of the smaller rendered dimension, with
    /// both sides derived from that base under a fixed aspect
    fn default_selection(&self) -> Rect {
        let bounds = self.mapper.rendered();
        let base = self.config.initial_fraction * bounds.width.min(bounds.height);
        let (width, height) = match self.config.aspect.ratio() {
            Some(ratio) if ratio >= 1.0 => (base, base / ratio),
            Some(ratio) => (base * ratio, base),
            None => (base, base),
        };
        Rect::new(
            (bounds.width - width) / 2.0,
            (bounds.height - height) / 2.0,
            width,
            height,
        )
        .clamped_inside(bounds)
    }

    /// Clamp, pad to the minimum size, and re-derive one dimension under a
    /// fixed aspect
    fn sanitize(&self, rect: Rect) -> Rect {
        let bounds = self.mapper.rendered();
        let mut width = rect.width.max(MIN_EDGE).min(bounds.width);
        let mut height = rect.height.max(MIN_EDGE).min(bounds.height);
        if let Some(ratio) = self.config.aspect.ratio() {
            height = width / ratio;
            let (w, h) = aspect::fit_within(width, height, ratio, bounds.width, bounds.height);
            width = w;
            height = h;
        }
        Rect::new(rect.x, rect.y, width, height).clamped_inside(bounds)
    }
}
