//! Utilities for tests.

use geom::Rect;

use crate::{
    color::Rgba,
    error::{Error, Result},
    render::Surface,
};

/// A surface that records every fill command, optionally failing after a
/// set number of calls to exercise error propagation.
#[derive(Debug, Default)]
pub struct TestSurface {
    /// Every fill received, in emission order.
    pub fills: Vec<(Rect, Rgba)>,
    /// When set, the surface fails once this many fills have landed.
    pub fail_after: Option<usize>,
}

impl TestSurface {
    /// A surface that records indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that fails once `n` fills have been recorded.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fills: Vec::new(),
            fail_after: Some(n),
        }
    }

    /// The rectangles received, in emission order.
    pub fn rects(&self) -> Vec<Rect> {
        self.fills.iter().map(|(r, _)| *r).collect()
    }
}

impl Surface for TestSurface {
    fn fill(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        if self.fail_after == Some(self.fills.len()) {
            return Err(Error::Render("injected surface failure".into()));
        }
        self.fills.push((rect, color));
        Ok(())
    }
}
