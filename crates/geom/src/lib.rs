//! Geometry primitives used across trellis.
//!
//! All coordinates are logical pixels in `f32`, matching the values handed to
//! the render sink.

/// Width/height size type.
mod expanse;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use expanse::Expanse;
pub use point::Point;
pub use rect::Rect;
