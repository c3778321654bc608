use proptest::prelude::*;
use trellis::{AlignX, AlignY, Context, Direction, Edges, Expanse, Layout, Rect, Result};

const EPS: f32 = 1e-3;

fn assert_near(a: f32, b: f32) {
    assert!((a - b).abs() < EPS, "expected {b}, got {a}");
}

fn ctx_with_window(w: f32, h: f32) -> Result<Context> {
    let mut ctx = Context::new()?;
    ctx.set_window(Expanse::new(w, h));
    Ok(ctx)
}

#[test]
fn root_is_sized_to_the_window() -> Result<()> {
    let mut ctx = ctx_with_window(800.0, 600.0)?;
    ctx.perform_layout()?;
    assert_eq!(ctx.rect(ctx.root())?, Rect::new(0.0, 0.0, 800.0, 600.0));
    Ok(())
}

#[test]
fn fit_width_sums_children_spacing_and_padding() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::row().padding(5.0).child_gap(10.0))?;
    for _ in 0..3 {
        let c = ctx.new_element(row)?;
        ctx.set_layout(c, Layout::new().fixed_width(100.0).fixed_height(50.0))?;
    }
    ctx.perform_layout()?;
    // 5 + 100 + 10 + 100 + 10 + 100 + 5
    assert_near(ctx.rect(row)?.w, 330.0);
    // Cross axis: widest child extent plus insets.
    assert_near(ctx.rect(row)?.h, 60.0);
    Ok(())
}

#[test]
fn fit_on_an_empty_element_is_the_padding_sum() -> Result<()> {
    let mut ctx = ctx_with_window(100.0, 100.0)?;
    let el = ctx.new_element(ctx.root())?;
    ctx.set_layout(el, Layout::new().padding(7.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(el)?.w, 14.0);
    assert_near(ctx.rect(el)?.h, 14.0);
    Ok(())
}

#[test]
fn fill_splits_leftover_space_by_weight() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::row().fixed_width(400.0).fixed_height(100.0))?;
    let a = ctx.new_element(row)?;
    ctx.set_layout(a, Layout::new().fill_width(1.0).fixed_height(100.0))?;
    let b = ctx.new_element(row)?;
    ctx.set_layout(b, Layout::new().fill_width(3.0).fixed_height(100.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(a)?.w, 100.0);
    assert_near(ctx.rect(b)?.w, 300.0);
    Ok(())
}

#[test]
fn fill_respects_min_and_redistributes() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::row().fixed_width(200.0).fixed_height(50.0))?;
    let a = ctx.new_element(row)?;
    ctx.set_layout(a, Layout::new().fill_width(1.0).min_width(150.0).fixed_height(50.0))?;
    let b = ctx.new_element(row)?;
    ctx.set_layout(b, Layout::new().fill_width(1.0).fixed_height(50.0))?;
    ctx.perform_layout()?;
    // Equal shares would be 100 each; a's minimum wins and b absorbs the
    // remainder.
    assert_near(ctx.rect(a)?.w, 150.0);
    assert_near(ctx.rect(b)?.w, 50.0);
    Ok(())
}

#[test]
fn fill_respects_max_and_redistributes() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::row().fixed_width(400.0).fixed_height(50.0))?;
    let a = ctx.new_element(row)?;
    ctx.set_layout(a, Layout::new().fill_width(1.0).max_width(80.0).fixed_height(50.0))?;
    let b = ctx.new_element(row)?;
    ctx.set_layout(b, Layout::new().fill_width(1.0).fixed_height(50.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(a)?.w, 80.0);
    assert_near(ctx.rect(b)?.w, 320.0);
    Ok(())
}

#[test]
fn zero_weight_fill_is_pinned_to_its_minimum() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::row().fixed_width(300.0).fixed_height(50.0))?;
    let a = ctx.new_element(row)?;
    ctx.set_layout(a, Layout::new().fill_width(0.0).min_width(40.0).fixed_height(50.0))?;
    let b = ctx.new_element(row)?;
    ctx.set_layout(b, Layout::new().fill_width(1.0).fixed_height(50.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(a)?.w, 40.0);
    assert_near(ctx.rect(b)?.w, 260.0);
    Ok(())
}

#[test]
fn fill_on_the_cross_axis_spans_the_parent() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(
        row,
        Layout::row()
            .fixed_width(300.0)
            .fixed_height(100.0)
            .padding_each(Edges::new(10.0, 20.0, 0.0, 0.0)),
    )?;
    let a = ctx.new_element(row)?;
    ctx.set_layout(a, Layout::new().fixed_width(50.0).fill_height(1.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(a)?.h, 70.0);
    Ok(())
}

#[test]
fn over_constrained_fill_keeps_last_written_sizes() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::row().fixed_width(100.0).fixed_height(50.0))?;
    let fixed = ctx.new_element(row)?;
    ctx.set_layout(fixed, Layout::new().fixed_width(150.0).fixed_height(50.0))?;
    let fill = ctx.new_element(row)?;
    ctx.set_layout(fill, Layout::new().fill_width(1.0).fixed_height(50.0))?;
    ctx.perform_layout()?;
    // No budget to distribute; the fixed child keeps its size and the fill
    // child is never assigned one.
    assert_near(ctx.rect(fixed)?.w, 150.0);
    assert_near(ctx.rect(fill)?.w, 0.0);
    Ok(())
}

#[test]
fn margins_collapse_against_padding_and_gap() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::row().padding(10.0).child_gap(8.0))?;
    let a = ctx.new_element(row)?;
    ctx.set_layout(a, Layout::new().fixed_width(100.0).fixed_height(20.0).margin(15.0))?;
    let b = ctx.new_element(row)?;
    ctx.set_layout(b, Layout::new().fixed_width(100.0).fixed_height(20.0).margin(5.0))?;
    ctx.perform_layout()?;
    // max(10,15) + 100 + max(15,5,8) + 100 + max(10,5)
    assert_near(ctx.rect(row)?.w, 240.0);
    assert_near(ctx.rect(a)?.x, 15.0);
    assert_near(ctx.rect(b)?.x, 130.0);
    Ok(())
}

#[test]
fn column_positions_children_top_to_bottom() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let col = ctx.new_element(ctx.root())?;
    ctx.set_layout(col, Layout::column().padding(4.0).child_gap(6.0))?;
    let a = ctx.new_element(col)?;
    ctx.set_layout(a, Layout::new().fixed_width(30.0).fixed_height(10.0))?;
    let b = ctx.new_element(col)?;
    ctx.set_layout(b, Layout::new().fixed_width(30.0).fixed_height(10.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(a)?.y, 4.0);
    assert_near(ctx.rect(b)?.y, 20.0);
    // Cross axis anchors at the left inset.
    assert_near(ctx.rect(a)?.x, 4.0);
    Ok(())
}

#[test]
fn reversed_directions_flow_backwards() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let row = ctx.new_element(ctx.root())?;
    ctx.set_layout(row, Layout::new().direction(Direction::RightToLeft))?;
    let a = ctx.new_element(row)?;
    ctx.set_layout(a, Layout::new().fixed_width(100.0).fixed_height(10.0))?;
    let b = ctx.new_element(row)?;
    ctx.set_layout(b, Layout::new().fixed_width(100.0).fixed_height(10.0))?;
    ctx.perform_layout()?;
    // The first child sits after the second in the packed run.
    assert_near(ctx.rect(b)?.x, 0.0);
    assert_near(ctx.rect(a)?.x, 100.0);

    let col = ctx.new_element(ctx.root())?;
    ctx.set_layout(col, Layout::new().direction(Direction::BottomToTop))?;
    let c = ctx.new_element(col)?;
    ctx.set_layout(c, Layout::new().fixed_width(10.0).fixed_height(40.0))?;
    let d = ctx.new_element(col)?;
    ctx.set_layout(d, Layout::new().fixed_width(10.0).fixed_height(40.0))?;
    ctx.perform_layout()?;
    assert!(ctx.rect(d)?.y < ctx.rect(c)?.y);
    Ok(())
}

#[test]
fn centering_is_clamped_to_the_insets() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let col = ctx.new_element(ctx.root())?;
    ctx.set_layout(
        col,
        Layout::column()
            .fixed_width(200.0)
            .fixed_height(200.0)
            .padding_each(Edges::new(0.0, 0.0, 60.0, 0.0))
            .align_x(AlignX::Center),
    )?;
    let a = ctx.new_element(col)?;
    ctx.set_layout(a, Layout::new().fixed_width(100.0).fixed_height(10.0))?;
    ctx.perform_layout()?;
    // Free centering would put the child at x = 50, inside the left inset.
    assert_near(ctx.rect(a)?.x, 60.0);
    Ok(())
}

#[test]
fn main_axis_alignment_shifts_the_run() -> Result<()> {
    let mut ctx = ctx_with_window(1000.0, 1000.0)?;
    let col = ctx.new_element(ctx.root())?;
    ctx.set_layout(
        col,
        Layout::column()
            .fixed_width(50.0)
            .fixed_height(300.0)
            .align_y(AlignY::Bottom),
    )?;
    let a = ctx.new_element(col)?;
    ctx.set_layout(a, Layout::new().fixed_width(50.0).fixed_height(100.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(a)?.y, 200.0);

    ctx.set_layout(
        col,
        Layout::column()
            .fixed_width(50.0)
            .fixed_height(300.0)
            .align_y(AlignY::Center),
    )?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(a)?.y, 100.0);
    Ok(())
}

#[test]
fn nested_fit_and_fill_compose() -> Result<()> {
    let mut ctx = ctx_with_window(600.0, 400.0)?;
    let outer = ctx.new_element(ctx.root())?;
    ctx.set_layout(outer, Layout::row().fill_width(1.0).fill_height(1.0))?;
    let sidebar = ctx.new_element(outer)?;
    ctx.set_layout(sidebar, Layout::column().fixed_width(150.0).fill_height(1.0))?;
    let main = ctx.new_element(outer)?;
    ctx.set_layout(main, Layout::column().fill_width(1.0).fill_height(1.0))?;
    ctx.perform_layout()?;
    assert_near(ctx.rect(outer)?.w, 600.0);
    assert_near(ctx.rect(sidebar)?.w, 150.0);
    assert_near(ctx.rect(main)?.w, 450.0);
    assert_near(ctx.rect(main)?.h, 400.0);
    assert_near(ctx.rect(main)?.x, 150.0);
    Ok(())
}

proptest! {
    // Unbounded fill children always exhaust the parent's budget exactly.
    #[test]
    fn fill_conserves_space(
        w1 in 0.1f32..10.0,
        w2 in 0.1f32..10.0,
        w3 in 0.1f32..10.0,
    ) {
        let mut ctx = ctx_with_window(1000.0, 1000.0).unwrap();
        let row = ctx.new_element(ctx.root()).unwrap();
        ctx.set_layout(row, Layout::row().fixed_width(600.0).fixed_height(50.0)).unwrap();
        let mut kids = Vec::new();
        for w in [w1, w2, w3] {
            let c = ctx.new_element(row).unwrap();
            ctx.set_layout(c, Layout::new().fill_width(w).fixed_height(50.0)).unwrap();
            kids.push(c);
        }
        ctx.perform_layout().unwrap();
        let total: f32 = kids.iter().map(|&c| ctx.rect(c).unwrap().w).sum();
        prop_assert!((total - 600.0).abs() < 0.01, "total {total}");
        for &c in &kids {
            prop_assert!(ctx.rect(c).unwrap().w >= 0.0);
        }
    }
}
