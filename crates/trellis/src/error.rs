use std::result::Result as StdResult;

use thiserror::Error;

use crate::pool::ElementId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A block, child list, or scratch buffer could not be allocated.
    #[error("out of memory")]
    OutOfMemory,

    /// The element id does not refer to a live element.
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// The child is already attached to a parent.
    #[error("already attached: {0}")]
    AlreadyAttached(ElementId),

    /// Attaching the child would create a cycle.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCreateCycle {
        /// The prospective parent.
        parent: ElementId,
        /// The child being attached.
        child: ElementId,
    },

    /// The render sink reported a failure.
    #[error("render: {0}")]
    Render(String),

    /// A usage-contract violation.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}
