//! Interactive crop session
//!
//! This module contains:
//! - the session state machine driven by pointer events
//! - pointer event types and handle hit-testing
//! - domain events returned to the host on every state change

pub mod events;
pub mod pointer;
pub mod state;

pub use events::SessionEvent;
pub use pointer::{DragPhase, PointerEvent, handle_at};
pub use state::CropSession;
