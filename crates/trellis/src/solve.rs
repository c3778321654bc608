//! The three-pass layout solver.
//!
//! Pass 1 (fit) walks post-order and sizes fixed and fit elements from
//! their children. Pass 2 (fill) walks pre-order and distributes each
//! parent's leftover space to its fill children. Pass 3 (position) walks
//! pre-order and assigns absolute coordinates. Width and height are
//! resolved independently; which pass logic applies to an axis depends on
//! whether it is the main axis of the parent's flow direction.

use geom::Rect;

use crate::{
    element::{Children, Element},
    error::Result,
    layout::{AlignX, AlignY, Direction, Layout, SizeAxis, Sizing},
    pool::{ElementId, Pool},
};

/// The axis a pass is currently resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Width / x.
    Horizontal,
    /// Height / y.
    Vertical,
}

/// Both axes, in the order the passes resolve them.
const AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

impl Axis {
    /// The rectangle's size along this axis.
    fn size(self, r: &Rect) -> f32 {
        match self {
            Self::Horizontal => r.w,
            Self::Vertical => r.h,
        }
    }

    /// Set the rectangle's size along this axis.
    fn set_size(self, r: &mut Rect, v: f32) {
        match self {
            Self::Horizontal => r.w = v,
            Self::Vertical => r.h = v,
        }
    }

    /// The rectangle's position along this axis.
    fn pos(self, r: &Rect) -> f32 {
        match self {
            Self::Horizontal => r.x,
            Self::Vertical => r.y,
        }
    }

    /// Set the rectangle's position along this axis.
    fn set_pos(self, r: &mut Rect, v: f32) {
        match self {
            Self::Horizontal => r.x = v,
            Self::Vertical => r.y = v,
        }
    }
}

/// True when `axis` is the main axis for flow direction `d`.
fn is_main(d: Direction, axis: Axis) -> bool {
    d.is_horizontal() == matches!(axis, Axis::Horizontal)
}

/// The sizing policy for one axis of a layout.
fn axis_policy(l: &Layout, axis: Axis) -> SizeAxis {
    match axis {
        Axis::Horizontal => l.width,
        Axis::Vertical => l.height,
    }
}

/// Leading and trailing padding along an axis.
fn padding(l: &Layout, axis: Axis) -> (f32, f32) {
    match axis {
        Axis::Horizontal => (l.padding.left, l.padding.right),
        Axis::Vertical => (l.padding.top, l.padding.bottom),
    }
}

/// Leading and trailing margin along an axis.
fn margin(l: &Layout, axis: Axis) -> (f32, f32) {
    match axis {
        Axis::Horizontal => (l.margin.left, l.margin.right),
        Axis::Vertical => (l.margin.top, l.margin.bottom),
    }
}

/// Alignment collapsed to axis-neutral terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    /// Left / top.
    Lead,
    /// Right / bottom.
    Trail,
    /// Centered, clamped to the edge insets.
    Center,
}

/// The alignment that applies along an axis.
fn alignment(l: &Layout, axis: Axis) -> Align {
    match axis {
        Axis::Horizontal => match l.align_x {
            AlignX::Left => Align::Lead,
            AlignX::Right => Align::Trail,
            AlignX::Center => Align::Center,
        },
        Axis::Vertical => match l.align_y {
            AlignY::Top => Align::Lead,
            AlignY::Bottom => Align::Trail,
            AlignY::Center => Align::Center,
        },
    }
}

/// How a fill child's size contributes to a parent-side sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillSize {
    /// Contribute the fill child's minimum (fit pass).
    Min,
    /// Contribute nothing (fill-pass budget computation).
    Zero,
    /// Contribute the resolved rectangle (position pass).
    Resolved,
}

/// Size and margins of the `index`-th child of `parent` along `axis`.
fn child_metrics(
    pool: &Pool,
    parent: ElementId,
    index: usize,
    axis: Axis,
    fill: FillSize,
) -> Option<(ElementId, f32, f32, f32)> {
    let cid = pool.get(parent)?.child_at(index)?;
    let child = pool.get(cid)?;
    let ax = axis_policy(&child.layout, axis);
    let size = if ax.sizing == Sizing::Fill {
        match fill {
            FillSize::Min => ax.min,
            FillSize::Zero => 0.0,
            FillSize::Resolved => axis.size(&child.rect),
        }
    } else {
        axis.size(&child.rect)
    };
    let (m_lead, m_trail) = margin(&child.layout, axis);
    Some((cid, size, m_lead, m_trail))
}

/// Run all three passes over the tree rooted at `root`.
pub(crate) fn solve(pool: &mut Pool, scratch: &mut Children, root: ElementId) -> Result<()> {
    fit_pass(pool, root);
    fill_pass(pool, scratch, root)?;
    position_pass(pool, root);
    Ok(())
}

/// Pass 1: post-order fit-sizing. Children are resolved before the parent so
/// a fit parent can sum settled child sizes.
fn fit_pass(pool: &mut Pool, id: ElementId) {
    let n = pool.get(id).map_or(0, Element::child_count);
    for i in 0..n {
        if let Some(child) = pool.get(id).and_then(|el| el.child_at(i)) {
            fit_pass(pool, child);
        }
    }
    for axis in AXES {
        let Some(el) = pool.get(id) else { return };
        let ax = axis_policy(&el.layout, axis);
        match ax.sizing {
            // Fixed setters pin min == max, so min is the size.
            Sizing::Fixed => {
                if let Some(el) = pool.get_mut(id) {
                    axis.set_size(&mut el.rect, ax.min);
                }
            }
            // Resolved by the fill pass from the parent's final size.
            Sizing::Fill => {}
            Sizing::Fit => fit_axis(pool, id, axis),
        }
    }
}

/// Resolve one fit axis from the element's children and padding.
fn fit_axis(pool: &mut Pool, id: ElementId, axis: Axis) {
    let Some(el) = pool.get(id) else { return };
    let lay = el.layout;
    let n = el.child_count();
    let (pad_lead, pad_trail) = padding(&lay, axis);

    let total = if n == 0 {
        pad_lead + pad_trail
    } else if is_main(lay.direction, axis) {
        // Sum of child sizes plus collapsed spacing: between children the
        // larger of trailing margin, leading margin, and gap; at the edges
        // the larger of padding and the outer margin.
        let mut total = 0.0;
        let mut prev: Option<f32> = None;
        for i in 0..n {
            let Some((_, size, m_lead, m_trail)) = child_metrics(pool, id, i, axis, FillSize::Min)
            else {
                continue;
            };
            let space = match prev {
                None => pad_lead.max(m_lead),
                Some(p) => p.max(m_lead).max(lay.child_gap),
            };
            total += space + size;
            prev = Some(m_trail);
        }
        total + prev.map_or(pad_trail, |p| pad_trail.max(p))
    } else {
        // Cross-axis siblings overlap the same span, so the fit size is the
        // widest child extent, not a sum.
        let mut widest = 0.0f32;
        for i in 0..n {
            let Some((_, size, m_lead, m_trail)) = child_metrics(pool, id, i, axis, FillSize::Min)
            else {
                continue;
            };
            let extent = size + pad_lead.max(m_lead) + pad_trail.max(m_trail);
            widest = widest.max(extent);
        }
        widest
    };

    if let Some(el) = pool.get_mut(id) {
        axis.set_size(&mut el.rect, total);
    }
}

/// Pass 2: pre-order fill-distribution. A parent's size is final before its
/// children distribute, so recursion happens after both axes are done.
fn fill_pass(pool: &mut Pool, scratch: &mut Children, id: ElementId) -> Result<()> {
    let n = pool.get(id).map_or(0, Element::child_count);
    if n > 0 {
        for axis in AXES {
            let Some(el) = pool.get(id) else { return Ok(()) };
            if is_main(el.layout.direction, axis) {
                fill_main(pool, scratch, id, axis)?;
            } else {
                fill_cross(pool, id, axis);
            }
        }
    }
    for i in 0..n {
        if let Some(child) = pool.get(id).and_then(|el| el.child_at(i)) {
            fill_pass(pool, scratch, child)?;
        }
    }
    Ok(())
}

/// Fill children on the cross axis span the parent's full content extent,
/// clamped to their own bounds.
fn fill_cross(pool: &mut Pool, id: ElementId, axis: Axis) {
    let Some(el) = pool.get(id) else { return };
    let lay = el.layout;
    let own = axis.size(&el.rect);
    let n = el.child_count();
    let (pad_lead, pad_trail) = padding(&lay, axis);

    for i in 0..n {
        let Some(cid) = pool.get(id).and_then(|el| el.child_at(i)) else {
            continue;
        };
        let Some(child) = pool.get(cid) else { continue };
        let ax = axis_policy(&child.layout, axis);
        if ax.sizing != Sizing::Fill {
            continue;
        }
        let (m_lead, m_trail) = margin(&child.layout, axis);
        let size = ax.clamp(own - pad_lead.max(m_lead) - pad_trail.max(m_trail));
        if let Some(child) = pool.get_mut(cid) {
            axis.set_size(&mut child.rect, size);
        }
    }
}

/// Fill children on the main axis share the parent's leftover space by
/// weight, iterating clamped children out of the working set until the
/// distribution reaches a fixed point.
fn fill_main(pool: &mut Pool, scratch: &mut Children, id: ElementId, axis: Axis) -> Result<()> {
    let Some(el) = pool.get(id) else { return Ok(()) };
    let lay = el.layout;
    let own = axis.size(&el.rect);
    let n = el.child_count();
    let (pad_lead, pad_trail) = padding(&lay, axis);

    // Space already spoken for: settled fixed/fit sizes plus all collapsed
    // spacing. Fill children hold their slots but contribute no size yet.
    let mut used = 0.0;
    let mut prev: Option<f32> = None;
    for i in 0..n {
        let Some((_, size, m_lead, m_trail)) = child_metrics(pool, id, i, axis, FillSize::Zero)
        else {
            continue;
        };
        let space = match prev {
            None => pad_lead.max(m_lead),
            Some(p) => p.max(m_lead).max(lay.child_gap),
        };
        used += space + size;
        prev = Some(m_trail);
    }
    used += prev.map_or(pad_lead + pad_trail, |p| pad_trail.max(p));
    let mut available = own - used;

    // Build the working set. Non-positive weights are pinned to their
    // minimum immediately and consume budget without distributing.
    scratch.clear();
    let mut total_weight = 0.0;
    for i in 0..n {
        let Some(cid) = pool.get(id).and_then(|el| el.child_at(i)) else {
            continue;
        };
        let Some(child) = pool.get(cid) else { continue };
        let ax = axis_policy(&child.layout, axis);
        if ax.sizing != Sizing::Fill {
            continue;
        }
        if ax.weight <= 0.0 {
            if let Some(child) = pool.get_mut(cid) {
                axis.set_size(&mut child.rect, ax.min);
            }
            available -= ax.min;
        } else {
            total_weight += ax.weight;
            scratch.push(cid)?;
        }
    }

    // Fixed-point sweeps: every pending child is written its proposal; a
    // child whose proposal violates a bound is locked at the bound, leaves
    // the set, and the remaining budget is redistributed. A negative budget
    // stops the loop with last-written sizes, which may sit below a stated
    // minimum; that over-constrained case is accepted, not corrected.
    while !scratch.is_empty() && available >= 0.0 && total_weight > 0.0 {
        let mut removed = false;
        let mut i = 0;
        while i < scratch.len() {
            let Some(cid) = scratch.get(i) else { break };
            let Some(child) = pool.get(cid) else {
                scratch.swap_remove(i);
                continue;
            };
            let ax = axis_policy(&child.layout, axis);
            let proposed = available * ax.weight / total_weight;
            let clamped = ax.clamp(proposed);
            if let Some(child) = pool.get_mut(cid) {
                axis.set_size(&mut child.rect, clamped);
            }
            if clamped == proposed {
                i += 1;
            } else {
                available -= clamped;
                total_weight -= ax.weight;
                scratch.swap_remove(i);
                removed = true;
                if available < 0.0 {
                    break;
                }
            }
        }
        if !removed {
            break;
        }
    }
    Ok(())
}

/// Pass 3: pre-order positioning. A parent's coordinates are absolute by
/// the time its children are placed.
fn position_pass(pool: &mut Pool, id: ElementId) {
    for axis in AXES {
        let Some(el) = pool.get(id) else { return };
        if is_main(el.layout.direction, axis) {
            position_main(pool, id, axis);
        } else {
            position_cross(pool, id, axis);
        }
    }
    let n = pool.get(id).map_or(0, Element::child_count);
    for i in 0..n {
        if let Some(child) = pool.get(id).and_then(|el| el.child_at(i)) {
            position_pass(pool, child);
        }
    }
}

/// Place children independently along the cross axis by alignment.
fn position_cross(pool: &mut Pool, id: ElementId, axis: Axis) {
    let Some(el) = pool.get(id) else { return };
    let lay = el.layout;
    let base = axis.pos(&el.rect);
    let own = axis.size(&el.rect);
    let n = el.child_count();
    let (pad_lead, pad_trail) = padding(&lay, axis);

    for i in 0..n {
        let Some((cid, size, m_lead, m_trail)) =
            child_metrics(pool, id, i, axis, FillSize::Resolved)
        else {
            continue;
        };
        let lead_space = pad_lead.max(m_lead);
        let trail_space = pad_trail.max(m_trail);
        let offset = match alignment(&lay, axis) {
            Align::Lead => lead_space,
            Align::Trail => own - size - trail_space,
            Align::Center => {
                // Centering never intrudes into an edge inset; a violated
                // edge wins and the child sits flush against it.
                let mut off = (own - size) / 2.0;
                if off < lead_space {
                    off = lead_space;
                } else if own - off - size < trail_space {
                    off = own - size - trail_space;
                }
                off
            }
        };
        if let Some(child) = pool.get_mut(cid) {
            axis.set_pos(&mut child.rect, base + offset);
        }
    }
}

/// Place children sequentially along the main axis, then shift the whole
/// run by the alignment offset.
fn position_main(pool: &mut Pool, id: ElementId, axis: Axis) {
    let Some(el) = pool.get(id) else { return };
    let lay = el.layout;
    let base = axis.pos(&el.rect);
    let own = axis.size(&el.rect);
    let n = el.child_count();
    if n == 0 {
        return;
    }
    let (pad_lead, pad_trail) = padding(&lay, axis);
    let reversed = lay.direction.is_reversed();

    let mut run = 0.0;
    let mut prev: Option<f32> = None;
    for i in 0..n {
        let index = if reversed { n - 1 - i } else { i };
        let Some((cid, size, m_lead, m_trail)) =
            child_metrics(pool, id, index, axis, FillSize::Resolved)
        else {
            continue;
        };
        let space = match prev {
            None => pad_lead.max(m_lead),
            Some(p) => p.max(m_lead).max(lay.child_gap),
        };
        run += space;
        if let Some(child) = pool.get_mut(cid) {
            axis.set_pos(&mut child.rect, run);
        }
        run += size;
        prev = Some(m_trail);
    }
    let span = run + prev.map_or(pad_trail, |p| pad_trail.max(p));

    let offset = match alignment(&lay, axis) {
        Align::Lead => 0.0,
        Align::Trail => own - span,
        // An over-full run pins the centered block to the leading edge.
        Align::Center => ((own - span) / 2.0).max(0.0),
    };
    for i in 0..n {
        let Some(cid) = pool.get(id).and_then(|el| el.child_at(i)) else {
            continue;
        };
        if let Some(child) = pool.get_mut(cid) {
            let shifted = axis.pos(&child.rect) + base + offset;
            axis.set_pos(&mut child.rect, shifted);
        }
    }
}
