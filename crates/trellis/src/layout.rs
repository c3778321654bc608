//! Sizing and spacing policy attached to each element.
//!
//! A [`Layout`] is pure data: mutating it never triggers a layout pass. The
//! chainable setters collect what would otherwise be a dozen individual
//! mutator calls into one coherent value that is applied to an element via
//! [`crate::Context::set_layout`].

/// How an element is sized along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sizing {
    /// Size is pinned to an exact pixel value.
    Fixed,
    /// Size is derived from the element's children plus its padding.
    #[default]
    Fit,
    /// Size is a weighted share of the parent's leftover space.
    Fill,
}

/// Per-axis sizing policy.
///
/// `max == 0.0` is the unbounded sentinel, not a zero bound. `weight` only
/// matters for [`Sizing::Fill`]; a weight of zero or less pins the element to
/// `min` and excludes it from distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeAxis {
    /// The sizing mode.
    pub sizing: Sizing,
    /// Lower bound in pixels.
    pub min: f32,
    /// Upper bound in pixels; 0.0 means unbounded.
    pub max: f32,
    /// Proportional share for fill distribution.
    pub weight: f32,
}

impl Default for SizeAxis {
    fn default() -> Self {
        Self {
            sizing: Sizing::Fit,
            min: 0.0,
            max: 0.0,
            weight: 1.0,
        }
    }
}

impl SizeAxis {
    /// An axis pinned to an exact size. `min == max` by construction.
    pub fn fixed(size: f32) -> Self {
        Self {
            sizing: Sizing::Fixed,
            min: size,
            max: size,
            weight: 1.0,
        }
    }

    /// An axis sized to its content.
    pub fn fit() -> Self {
        Self::default()
    }

    /// An axis taking a weighted share of leftover space.
    pub fn fill(weight: f32) -> Self {
        Self {
            sizing: Sizing::Fill,
            min: 0.0,
            max: 0.0,
            weight,
        }
    }

    /// Clamp a proposed size to this axis's bounds, treating `max == 0.0` as
    /// unbounded.
    pub(crate) fn clamp(&self, size: f32) -> f32 {
        let mut size = size;
        if size < self.min {
            size = self.min;
        }
        if self.max > 0.0 && size > self.max {
            size = self.max;
        }
        size
    }
}

/// Per-side spacing, used for both padding and margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    /// Top inset.
    pub top: f32,
    /// Bottom inset.
    pub bottom: f32,
    /// Left inset.
    pub left: f32,
    /// Right inset.
    pub right: f32,
}

impl Edges {
    /// Construct edges with individual values per side.
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// The same inset on all four sides.
    pub fn all(v: f32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// The flow direction of a container's children.
///
/// The direction selects the main axis (children placed sequentially) and
/// whether the flow runs in reverse along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Children flow downward; the main axis is vertical.
    #[default]
    TopToBottom,
    /// Children flow upward; the main axis is vertical.
    BottomToTop,
    /// Children flow rightward; the main axis is horizontal.
    LeftToRight,
    /// Children flow leftward; the main axis is horizontal.
    RightToLeft,
}

impl Direction {
    /// True when the main axis is horizontal.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// True when children are placed in reverse order along the main axis.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::RightToLeft | Self::BottomToTop)
    }
}

/// Horizontal alignment, applied when the horizontal axis is not the main
/// axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignX {
    /// Anchor at the left inset.
    #[default]
    Left,
    /// Anchor at the right inset.
    Right,
    /// Center, clamped so neither inset is violated.
    Center,
}

/// Vertical alignment, applied when the vertical axis is not the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignY {
    /// Anchor at the top inset.
    #[default]
    Top,
    /// Anchor at the bottom inset.
    Bottom,
    /// Center, clamped so neither inset is violated.
    Center,
}

/// The full sizing and spacing policy for one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Horizontal sizing policy.
    pub width: SizeAxis,
    /// Vertical sizing policy.
    pub height: SizeAxis,
    /// Inner inset applied when placing children.
    pub padding: Edges,
    /// Outer inset requested from the parent and siblings.
    pub margin: Edges,
    /// Minimum spacing between consecutive children on the main axis.
    pub child_gap: f32,
    /// Flow direction for children.
    pub direction: Direction,
    /// Horizontal alignment for children on the cross axis.
    pub align_x: AlignX,
    /// Vertical alignment for children on the cross axis.
    pub align_y: AlignY,
}

impl Layout {
    /// A default fit-sized layout flowing top to bottom.
    pub fn new() -> Self {
        Self::default()
    }

    /// A layout flowing children top to bottom.
    pub fn column() -> Self {
        Self::new().direction(Direction::TopToBottom)
    }

    /// A layout flowing children left to right.
    pub fn row() -> Self {
        Self::new().direction(Direction::LeftToRight)
    }

    /// Pin the width to an exact value.
    pub fn fixed_width(mut self, w: f32) -> Self {
        self.width = SizeAxis::fixed(w);
        self
    }

    /// Pin the height to an exact value.
    pub fn fixed_height(mut self, h: f32) -> Self {
        self.height = SizeAxis::fixed(h);
        self
    }

    /// Size the width to content.
    pub fn fit_width(mut self) -> Self {
        self.width = SizeAxis::fit();
        self
    }

    /// Size the height to content.
    pub fn fit_height(mut self) -> Self {
        self.height = SizeAxis::fit();
        self
    }

    /// Let the width take a weighted share of leftover space.
    pub fn fill_width(mut self, weight: f32) -> Self {
        self.width = SizeAxis::fill(weight);
        self
    }

    /// Let the height take a weighted share of leftover space.
    pub fn fill_height(mut self, weight: f32) -> Self {
        self.height = SizeAxis::fill(weight);
        self
    }

    /// Set the width lower bound.
    pub fn min_width(mut self, v: f32) -> Self {
        self.width.min = v;
        self
    }

    /// Set the width upper bound; 0.0 means unbounded.
    pub fn max_width(mut self, v: f32) -> Self {
        self.width.max = v;
        self
    }

    /// Set the height lower bound.
    pub fn min_height(mut self, v: f32) -> Self {
        self.height.min = v;
        self
    }

    /// Set the height upper bound; 0.0 means unbounded.
    pub fn max_height(mut self, v: f32) -> Self {
        self.height.max = v;
        self
    }

    /// Set a uniform padding on all sides.
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    /// Set per-side padding.
    pub fn padding_each(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    /// Set a uniform margin on all sides.
    pub fn margin(mut self, v: f32) -> Self {
        self.margin = Edges::all(v);
        self
    }

    /// Set per-side margin.
    pub fn margin_each(mut self, edges: Edges) -> Self {
        self.margin = edges;
        self
    }

    /// Set the minimum inter-child gap on the main axis.
    pub fn child_gap(mut self, v: f32) -> Self {
        self.child_gap = v;
        self
    }

    /// Set the flow direction.
    pub fn direction(mut self, d: Direction) -> Self {
        self.direction = d;
        self
    }

    /// Set the horizontal cross-axis alignment.
    pub fn align_x(mut self, a: AlignX) -> Self {
        self.align_x = a;
        self
    }

    /// Set the vertical cross-axis alignment.
    pub fn align_y(mut self, a: AlignY) -> Self {
        self.align_y = a;
        self
    }
}
