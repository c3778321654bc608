//! Pooled element allocator.
//!
//! All elements are the same size, so the pool is a single size class: a
//! slot arena where each live slot owns one heap block, a free stack of
//! recycled blocks, and a vacant stack of slots whose blocks have been
//! released. The retention cap bounds how many freed blocks the pool keeps
//! when elements churn in bursts; blocks freed beyond the cap go back to the
//! allocator immediately.

use std::mem;

use tracing::trace;

use crate::{
    element::Element,
    error::{Error, Result},
};

/// Default number of freed blocks the pool retains for recycling.
pub const DEFAULT_RETAIN_CAP: usize = 8192;

/// Opaque handle to an element in the pool.
///
/// Non-owning: the pool owns element lifetime. A handle held across
/// [`Pool::free`] and a later allocation may observe the recycled element;
/// callers that need to outlive a free must not retain the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

impl ElementId {
    /// Construct an id from a raw slot index.
    pub(crate) fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The raw slot index.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// The state of one pool slot.
#[derive(Debug)]
enum Slot {
    /// A live element.
    Live(Box<Element>),
    /// A freed block kept for recycling; its index is on the free stack.
    Retained(Box<Element>),
    /// The block has been released; the slot index is on the vacant stack.
    Vacant,
}

/// Fixed-size-block allocator with free-stack recycling and a retention cap.
#[derive(Debug)]
pub(crate) struct Pool {
    /// One entry per slot ever created.
    slots: Vec<Slot>,
    /// Indices of `Retained` slots, ready for recycling.
    free: Vec<u32>,
    /// Indices of `Vacant` slots, reusable without keeping a block alive.
    vacant: Vec<u32>,
    /// Maximum number of freed blocks kept on the free stack.
    retain_cap: usize,
    /// Number of allocations served by recycling a retained block.
    recycled: u64,
    /// Number of blocks released past the retention cap.
    released: u64,
}

impl Pool {
    /// Construct a pool retaining at most `retain_cap` freed blocks.
    pub(crate) fn new(retain_cap: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            vacant: Vec::new(),
            retain_cap,
            recycled: 0,
            released: 0,
        }
    }

    /// Allocate an element reset to defaults.
    ///
    /// Recycles a retained block when one is available, then refills a
    /// vacant slot, and only then grows the slot arena.
    pub(crate) fn alloc(&mut self) -> Result<ElementId> {
        while let Some(idx) = self.free.pop() {
            let i = idx as usize;
            match mem::replace(&mut self.slots[i], Slot::Vacant) {
                Slot::Retained(mut el) => {
                    el.reset();
                    self.slots[i] = Slot::Live(el);
                    self.recycled += 1;
                    return Ok(ElementId(idx));
                }
                // Stale free-stack entry; put the slot back and keep looking.
                other => self.slots[i] = other,
            }
        }
        if let Some(idx) = self.vacant.pop() {
            self.slots[idx as usize] = Slot::Live(Box::default());
            return Ok(ElementId(idx));
        }
        self.slots.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        let idx = u32::try_from(self.slots.len()).map_err(|_| Error::OutOfMemory)?;
        self.slots.push(Slot::Live(Box::default()));
        Ok(ElementId(idx))
    }

    /// Return a live element's block to the pool.
    ///
    /// Below the retention cap the block is kept for recycling; past it the
    /// block is released to the allocator. Freeing a dead slot is an error.
    pub(crate) fn free(&mut self, id: ElementId) -> Result<()> {
        let i = id.index();
        if !self.contains(id) {
            return Err(Error::ElementNotFound(id));
        }
        let retain = self.free.len() < self.retain_cap;
        if retain {
            self.free.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        } else {
            self.vacant.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        }
        match mem::replace(&mut self.slots[i], Slot::Vacant) {
            Slot::Live(el) => {
                if retain {
                    self.slots[i] = Slot::Retained(el);
                    self.free.push(id.0);
                } else {
                    drop(el);
                    self.vacant.push(id.0);
                    self.released += 1;
                    trace!(slot = id.0, "released block past retention cap");
                }
                Ok(())
            }
            other => {
                self.slots[i] = other;
                Err(Error::ElementNotFound(id))
            }
        }
    }

    /// True when the id refers to a live element.
    pub(crate) fn contains(&self, id: ElementId) -> bool {
        matches!(self.slots.get(id.index()), Some(Slot::Live(_)))
    }

    /// The live element for `id`, if any.
    pub(crate) fn get(&self, id: ElementId) -> Option<&Element> {
        match self.slots.get(id.index()) {
            Some(Slot::Live(el)) => Some(el),
            _ => None,
        }
    }

    /// Mutable access to the live element for `id`, if any.
    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Live(el)) => Some(el),
            _ => None,
        }
    }

    /// Number of allocations served from the free stack.
    pub(crate) fn recycled(&self) -> u64 {
        self.recycled
    }

    /// Number of blocks released past the retention cap.
    pub(crate) fn released(&self) -> u64 {
        self.released
    }

    /// Number of freed blocks currently retained.
    pub(crate) fn retained(&self) -> usize {
        self.free.len()
    }
}
