//! The per-UI-instance engine state.
//!
//! A [`Context`] owns the allocator, the root element, the window size, and
//! a scratch list reused by fill-distribution. Every tree mutation and every
//! frame runs through it on a single thread; nothing here is reentrant.

use geom::{Expanse, Rect};
use tracing::{debug, trace};

use crate::{
    color::Rgba,
    element::{Children, Content, Element},
    error::{Error, Result},
    layout::{Layout, SizeAxis},
    pool::{DEFAULT_RETAIN_CAP, ElementId, Pool},
    render::{draw_walk, Surface},
    solve::solve,
};

/// Engine state for one UI tree.
#[derive(Debug)]
pub struct Context {
    /// Element storage.
    pool: Pool,
    /// The root element. Always live, never detachable, resized to the
    /// window at the start of every layout.
    root: ElementId,
    /// Working set reused by fill-distribution across calls.
    scratch: Children,
    /// Current window size in logical pixels.
    window: Expanse,
    /// Sticky out-of-memory record; cleared only by constructing a fresh
    /// context.
    last_error: Option<Error>,
}

impl Context {
    /// Construct a context with the default block retention cap.
    ///
    /// Fails only if the root element cannot be allocated.
    pub fn new() -> Result<Self> {
        Self::with_retention(DEFAULT_RETAIN_CAP)
    }

    /// Construct a context retaining at most `retain_cap` freed blocks for
    /// recycling.
    pub fn with_retention(retain_cap: usize) -> Result<Self> {
        let mut pool = Pool::new(retain_cap);
        let root = pool.alloc()?;
        debug!(retain_cap, "context initialized");
        Ok(Self {
            pool,
            root,
            scratch: Children::new(),
            window: Expanse::new(0.0, 0.0),
            last_error: None,
        })
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Report the current window size. Takes effect at the next layout.
    pub fn set_window(&mut self, window: Expanse) {
        self.window = window;
    }

    /// The window size last reported.
    pub fn window(&self) -> Expanse {
        self.window
    }

    /// The sticky error record: set the first time any operation fails with
    /// [`Error::OutOfMemory`], and kept for the life of the context so a
    /// caller can poll after a frame instead of checking every result.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Record a sticky out-of-memory failure on the way out.
    fn note<T>(&mut self, r: Result<T>) -> Result<T> {
        if matches!(r, Err(Error::OutOfMemory)) {
            self.last_error = Some(Error::OutOfMemory);
        }
        r
    }

    /// Allocate a new element and attach it as the last child of `parent`.
    ///
    /// If attachment fails after a successful allocation, the block is
    /// returned to the pool rather than leaked.
    pub fn new_element(&mut self, parent: ElementId) -> Result<ElementId> {
        if !self.pool.contains(parent) {
            return Err(Error::ElementNotFound(parent));
        }
        let r = self.pool.alloc();
        let id = self.note(r)?;
        match self.attach(parent, id) {
            Ok(()) => Ok(id),
            Err(e) => {
                // Attach can only fail before linking, so the block is
                // still detached and safe to free.
                let _ = self.pool.free(id);
                Err(e)
            }
        }
    }

    /// Attach an existing detached element as the last child of `parent`.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        let r = self.attach(parent, child);
        self.note(r)
    }

    fn attach(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if !self.pool.contains(parent) {
            return Err(Error::ElementNotFound(parent));
        }
        let Some(c) = self.pool.get(child) else {
            return Err(Error::ElementNotFound(child));
        };
        if c.parent().is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if child == self.root {
            return Err(Error::InvalidOperation(
                "the root element cannot be attached to a parent".into(),
            ));
        }
        // A cycle forms exactly when the prospective parent sits inside the
        // child's subtree.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(Error::WouldCreateCycle { parent, child });
            }
            cursor = self.pool.get(id).and_then(Element::parent);
        }
        let Some(children) = self
            .pool
            .get_mut(parent)
            .and_then(|el| el.content.children_mut())
        else {
            return Err(Error::InvalidOperation(
                "text elements cannot hold children".into(),
            ));
        };
        children.push(child)?;
        if let Some(c) = self.pool.get_mut(child) {
            c.parent = Some(parent);
        }
        self.debug_check(parent);
        Ok(())
    }

    /// Detach `child` from `parent`, preserving sibling order. The element
    /// stays live and can be re-attached or freed later. Detaching an
    /// element that is already unparented is a no-op.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if child == self.root {
            return Err(Error::InvalidOperation(
                "the root element cannot be detached".into(),
            ));
        }
        if !self.pool.contains(child) {
            return Err(Error::ElementNotFound(child));
        }
        // Detaching an element that has no parent is a no-op.
        if self.pool.get(child).and_then(Element::parent).is_none() {
            return Ok(());
        }
        let Some(children) = self
            .pool
            .get_mut(parent)
            .and_then(|el| el.content.children_mut())
        else {
            return Err(Error::ElementNotFound(parent));
        };
        let Some(index) = children.position(child) else {
            return Err(Error::ElementNotFound(child));
        };
        children.remove(index);
        if let Some(c) = self.pool.get_mut(child) {
            c.parent = None;
        }
        self.debug_check(parent);
        Ok(())
    }

    /// Free an element and its entire subtree, returning every block to the
    /// pool. Detaches from the parent first if still attached.
    pub fn free_element(&mut self, id: ElementId) -> Result<()> {
        if id == self.root {
            return Err(Error::InvalidOperation(
                "the root element cannot be freed".into(),
            ));
        }
        if !self.pool.contains(id) {
            return Err(Error::ElementNotFound(id));
        }
        if let Some(parent) = self.pool.get(id).and_then(Element::parent) {
            self.remove_child(parent, id)?;
        }
        let r = free_subtree(&mut self.pool, id);
        self.note(r)
    }

    /// Replace an element's sizing and spacing policy.
    pub fn set_layout(&mut self, id: ElementId, layout: Layout) -> Result<()> {
        let el = self
            .pool
            .get_mut(id)
            .ok_or(Error::ElementNotFound(id))?;
        el.layout = layout;
        Ok(())
    }

    /// An element's sizing and spacing policy.
    pub fn layout(&self, id: ElementId) -> Result<Layout> {
        self.pool
            .get(id)
            .map(|el| el.layout)
            .ok_or(Error::ElementNotFound(id))
    }

    /// Set an element's background color.
    pub fn set_background(&mut self, id: ElementId, color: Rgba) -> Result<()> {
        let el = self
            .pool
            .get_mut(id)
            .ok_or(Error::ElementNotFound(id))?;
        el.background = color;
        Ok(())
    }

    /// An element's background color.
    pub fn background(&self, id: ElementId) -> Result<Rgba> {
        self.pool
            .get(id)
            .map(|el| el.background)
            .ok_or(Error::ElementNotFound(id))
    }

    /// Turn an element into a text leaf. Fails if it has children.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<()> {
        let el = self
            .pool
            .get_mut(id)
            .ok_or(Error::ElementNotFound(id))?;
        if el.child_count() > 0 {
            return Err(Error::InvalidOperation(
                "an element with children cannot become text".into(),
            ));
        }
        el.content = Content::Text(text.into());
        Ok(())
    }

    /// An element's text run, if it is a text leaf.
    pub fn text(&self, id: ElementId) -> Result<Option<&str>> {
        self.pool
            .get(id)
            .map(|el| el.content.text())
            .ok_or(Error::ElementNotFound(id))
    }

    /// An element's resolved rectangle. Stale until the first layout.
    pub fn rect(&self, id: ElementId) -> Result<Rect> {
        self.pool
            .get(id)
            .map(|el| el.rect)
            .ok_or(Error::ElementNotFound(id))
    }

    /// An element's parent, if attached.
    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>> {
        self.pool
            .get(id)
            .map(Element::parent)
            .ok_or(Error::ElementNotFound(id))
    }

    /// An element's children in flow order.
    pub fn children(&self, id: ElementId) -> Result<&[ElementId]> {
        self.pool
            .get(id)
            .map(Element::child_ids)
            .ok_or(Error::ElementNotFound(id))
    }

    /// True when `id` refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.pool.contains(id)
    }

    /// Number of allocations served by recycling a retained block.
    pub fn recycled(&self) -> u64 {
        self.pool.recycled()
    }

    /// Number of blocks released past the retention cap.
    pub fn released(&self) -> u64 {
        self.pool.released()
    }

    /// Run the three layout passes over the whole tree.
    ///
    /// The root is pinned to the current window size first; everything else
    /// resolves from there. Geometry mutated before a failure is left in
    /// place, since a failed frame is retried wholesale.
    pub fn perform_layout(&mut self) -> Result<()> {
        if let Some(el) = self.pool.get_mut(self.root) {
            el.rect = Rect::new(0.0, 0.0, 0.0, 0.0);
            el.layout.width = SizeAxis::fixed(self.window.w);
            el.layout.height = SizeAxis::fixed(self.window.h);
        }
        trace!(w = self.window.w, h = self.window.h, "layout");
        let r = solve(&mut self.pool, &mut self.scratch, self.root);
        self.note(r)
    }

    /// Run layout, then emit the tree to `surface` in pre-order.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<()> {
        self.perform_layout()?;
        draw_walk(&self.pool, surface, self.root)
    }

    /// Verify parent/child link symmetry around `parent` after a mutation.
    fn debug_check(&self, parent: ElementId) {
        if cfg!(debug_assertions) {
            if let Some(el) = self.pool.get(parent) {
                for &c in el.child_ids() {
                    debug_assert!(self.pool.contains(c), "dead child {c} under {parent}");
                    debug_assert_eq!(
                        self.pool.get(c).and_then(Element::parent),
                        Some(parent),
                        "child {c} does not point back at {parent}"
                    );
                }
            }
        }
    }
}

/// Free `id` and every element below it, in leaf-first order.
fn free_subtree(pool: &mut Pool, id: ElementId) -> Result<()> {
    loop {
        let child = pool
            .get_mut(id)
            .and_then(|el| el.content.children_mut())
            .and_then(|c| {
                let n = c.len();
                if n == 0 { None } else { c.swap_remove(n - 1) }
            });
        match child {
            Some(c) => free_subtree(pool, c)?,
            None => break,
        }
    }
    pool.free(id)
}
