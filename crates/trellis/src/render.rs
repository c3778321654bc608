//! Render sink abstraction and the draw walk.

use geom::Rect;

use crate::{
    color::Rgba,
    error::Result,
    pool::{ElementId, Pool},
};

/// A destination for draw commands.
///
/// The engine emits one filled rectangle per element; everything else about
/// the target (pixels, terminals, command lists) is the implementor's
/// business. A failure from the sink aborts the walk and propagates.
pub trait Surface {
    /// Fill `rect` with `color`.
    fn fill(&mut self, rect: Rect, color: Rgba) -> Result<()>;
}

/// A surface that discards every command, for headless layout runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill(&mut self, _rect: Rect, _color: Rgba) -> Result<()> {
        Ok(())
    }
}

/// Emit the subtree rooted at `id` in pre-order: each element before its
/// children, children in flow order. Text elements emit their background
/// rectangle like any other leaf.
pub(crate) fn draw_walk<S: Surface + ?Sized>(
    pool: &Pool,
    surface: &mut S,
    id: ElementId,
) -> Result<()> {
    let Some(el) = pool.get(id) else {
        return Ok(());
    };
    surface.fill(el.rect, el.background)?;
    for &child in el.child_ids() {
        draw_walk(pool, surface, child)?;
    }
    Ok(())
}
