//! Pure domain types with minimal dependencies
//!
//! Core geometry and selection types used throughout the engine. Nothing
//! here touches image decoding, async runtimes or I/O.

pub mod geometry;
pub mod selection;

pub use geometry::*;
pub use selection::*;
