//! Element data and the child collection.

use geom::Rect;

use crate::{
    color::Rgba,
    error::{Error, Result},
    layout::Layout,
    pool::ElementId,
};

/// What an element holds: either an ordered child collection or a text run.
///
/// Text elements are leaves; the layout passes treat them as childless and
/// the draw walk still emits their background rectangle. Modelling this as a
/// tagged variant rather than a union removes the "wrong accessor" class of
/// bugs.
#[derive(Debug)]
pub enum Content {
    /// An ordered collection of child elements.
    Children(Children),
    /// A text run. Shaping and measurement are out of scope; the element
    /// sizes as an empty container.
    Text(String),
}

impl Default for Content {
    fn default() -> Self {
        Self::Children(Children::default())
    }
}

impl Content {
    /// The child collection, if this is a container.
    pub fn children(&self) -> Option<&Children> {
        match self {
            Self::Children(c) => Some(c),
            Self::Text(_) => None,
        }
    }

    /// Mutable access to the child collection, if this is a container.
    pub(crate) fn children_mut(&mut self) -> Option<&mut Children> {
        match self {
            Self::Children(c) => Some(c),
            Self::Text(_) => None,
        }
    }

    /// The text run, if this is a text element.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Children(_) => None,
            Self::Text(t) => Some(t),
        }
    }
}

/// A node in the element tree.
///
/// The pool owns every element's lifetime; `parent` is a non-owning
/// back-reference and `content` owns only the list of child ids, not the
/// children themselves.
#[derive(Debug)]
pub struct Element {
    /// Resolved rectangle. Stale until the first layout pass of a frame.
    pub rect: Rect,
    /// Sizing and spacing policy.
    pub layout: Layout,
    /// Background color handed to the render sink.
    pub background: Rgba,
    /// Back-reference to the parent, if attached.
    pub(crate) parent: Option<ElementId>,
    /// Children or text content.
    pub(crate) content: Content,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            rect: Rect::zero(),
            layout: Layout::default(),
            background: Rgba::WHITE,
            parent: None,
            content: Content::default(),
        }
    }
}

impl Element {
    /// Reset this element to allocation defaults, reusing the child list's
    /// storage where possible.
    pub(crate) fn reset(&mut self) {
        self.rect = Rect::zero();
        self.layout = Layout::default();
        self.background = Rgba::WHITE;
        self.parent = None;
        match &mut self.content {
            Content::Children(c) => c.clear(),
            content => *content = Content::default(),
        }
    }

    /// The parent of this element, if attached.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// The child ids in flow order; empty for text elements.
    pub fn child_ids(&self) -> &[ElementId] {
        match &self.content {
            Content::Children(c) => c.as_slice(),
            Content::Text(_) => &[],
        }
    }

    /// Number of children; zero for text elements.
    pub fn child_count(&self) -> usize {
        self.child_ids().len()
    }

    /// The child at `index`, if present.
    pub fn child_at(&self, index: usize) -> Option<ElementId> {
        self.child_ids().get(index).copied()
    }
}

/// An insertion-ordered, geometrically growing sequence of child ids.
///
/// Growth runs 0 → 2 → doubling, through fallible reservation so exhaustion
/// surfaces as [`Error::OutOfMemory`] instead of aborting.
#[derive(Debug, Default)]
pub struct Children {
    /// Child ids in flow order.
    ids: Vec<ElementId>,
}

impl Children {
    /// Construct an empty collection with no capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when there are no children.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The ids as a slice, in flow order.
    pub fn as_slice(&self) -> &[ElementId] {
        &self.ids
    }

    /// The id at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<ElementId> {
        self.ids.get(index).copied()
    }

    /// The index of `id`, if present.
    pub(crate) fn position(&self, id: ElementId) -> Option<usize> {
        self.ids.iter().position(|c| *c == id)
    }

    /// Append a child, growing capacity 0 → 2 → doubling.
    pub(crate) fn push(&mut self, id: ElementId) -> Result<()> {
        if self.ids.len() == self.ids.capacity() {
            let grow = if self.ids.capacity() == 0 {
                2
            } else {
                self.ids.capacity()
            };
            self.ids
                .try_reserve_exact(grow)
                .map_err(|_| Error::OutOfMemory)?;
        }
        self.ids.push(id);
        Ok(())
    }

    /// Remove the child at `index`, preserving sibling order. Out-of-range
    /// indices are a no-op returning `None`.
    pub(crate) fn remove(&mut self, index: usize) -> Option<ElementId> {
        if index < self.ids.len() {
            Some(self.ids.remove(index))
        } else {
            None
        }
    }

    /// Remove the child at `index` without preserving order. Used only for
    /// working-set bookkeeping where order is irrelevant. Out-of-range
    /// indices are a no-op returning `None`.
    pub(crate) fn swap_remove(&mut self, index: usize) -> Option<ElementId> {
        if index < self.ids.len() {
            Some(self.ids.swap_remove(index))
        } else {
            None
        }
    }

    /// Drop all children, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }
}
