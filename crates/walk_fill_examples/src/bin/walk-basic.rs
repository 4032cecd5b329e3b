use walk_fill::prelude::*;
use walk_fill_examples::{grid_to_ascii, init_tracing, render_tiles_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A fixed seed replays the same map on every run.
    let config = GenerationConfig::new(64, 48)
        .with_target_fill_fraction(0.45)
        .with_ticks_per_second(5_000.0)
        .with_seed(2025);

    let mut session = GenerationSession::try_new(config, ColorBuffer::with_size(64, 48))?;
    session.generate()?;
    session.run(&mut SystemClock::new())?;

    if let (Some(grid), Some(walker)) = (session.grid(), session.walker()) {
        println!("{}", grid_to_ascii(grid, Some(walker.position)));
        println!(
            "{} ticks, {}/{} cells filled",
            walker.ticks,
            walker.filled_count,
            grid.len()
        );
    }

    render_tiles_to_png(session.tiles(), &RenderConfig::new(8), "walk-basic.png")?;
    Ok(())
}
