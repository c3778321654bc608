//! A retained-tree rectangle layout engine.
//!
//! Callers build a tree of elements through a [`Context`], give each element
//! a sizing and spacing policy via [`Layout`], report the window size, and
//! ask for a draw. The engine resolves every element's rectangle in three
//! passes (fit-sizing, fill-distribution, positioning) and emits one filled
//! rectangle per element to a [`Surface`].
//!
//! Element storage is pooled: freed elements are recycled up to a retention
//! cap, and every growth path is fallible, surfacing exhaustion as
//! [`Error::OutOfMemory`] instead of aborting.

mod color;
mod context;
mod element;
mod error;
mod layout;
mod pool;
mod render;
mod solve;

pub mod tutils;

pub use color::Rgba;
pub use context::Context;
pub use element::{Children, Content, Element};
pub use error::{Error, Result};
pub use geom::{Expanse, Point, Rect};
pub use layout::{AlignX, AlignY, Direction, Edges, Layout, SizeAxis, Sizing};
pub use pool::{DEFAULT_RETAIN_CAP, ElementId};
pub use render::{NullSurface, Surface};
