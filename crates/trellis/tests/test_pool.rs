use trellis::{Context, Result};

#[test]
fn freed_elements_are_recycled_within_the_cap() -> Result<()> {
    let mut ctx = Context::new()?;
    let mut ids = Vec::new();
    for _ in 0..64 {
        ids.push(ctx.new_element(ctx.root())?);
    }
    for id in &ids {
        ctx.free_element(*id)?;
    }
    assert_eq!(ctx.released(), 0);

    // The second batch is served entirely from recycled blocks.
    for _ in 0..64 {
        let id = ctx.new_element(ctx.root())?;
        assert!(ids.contains(&id));
    }
    assert_eq!(ctx.recycled(), 64);
    Ok(())
}

#[test]
fn churn_past_the_cap_releases_blocks() -> Result<()> {
    let mut ctx = Context::with_retention(4)?;
    let mut ids = Vec::new();
    for _ in 0..10 {
        ids.push(ctx.new_element(ctx.root())?);
    }
    for id in &ids {
        ctx.free_element(*id)?;
    }
    assert_eq!(ctx.released(), 6);

    // Allocation still reuses slots rather than growing the arena.
    for _ in 0..10 {
        let id = ctx.new_element(ctx.root())?;
        assert!(ids.contains(&id));
    }
    assert_eq!(ctx.recycled(), 4);
    assert!(ctx.last_error().is_none());
    Ok(())
}

#[test]
fn stale_ids_stay_invalid_until_reuse() -> Result<()> {
    let mut ctx = Context::new()?;
    let a = ctx.new_element(ctx.root())?;
    ctx.free_element(a)?;
    assert!(!ctx.contains(a));

    // Recycling hands the same slot to a new element; the old id now
    // observes the new element, matching pooled-handle semantics.
    let b = ctx.new_element(ctx.root())?;
    assert_eq!(a, b);
    assert!(ctx.contains(a));
    Ok(())
}
