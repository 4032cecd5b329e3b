use walk_fill::prelude::*;
use walk_fill_examples::{init_tracing, render_grid_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = GenerationConfig::new(80, 80)
        .with_target_fill_fraction(0.55)
        .with_flights(0.01, (3, 8))
        .with_seed(99);

    let mut session = GenerationSession::headless(config)?;
    session.generate()?;
    session.run(&mut ManualClock::new())?;
    let Some(walked) = session.grid().cloned() else {
        anyhow::bail!("session produced no grid");
    };
    render_grid_to_png(&walked, &RenderConfig::new(6), "holes-none.png")?;

    // Closed holes are tinted so each strategy's reach is visible.
    for (out, strategy) in [
        ("holes-cardinal4.png", HoleCheck::Cardinal4),
        ("holes-full8.png", HoleCheck::Full8),
        ("holes-diagonal4.png", HoleCheck::Diagonal4),
    ] {
        let mut grid = walked.clone();
        let closed = fill_holes(&mut grid, strategy);
        println!("{strategy:?}: closed {} holes", closed.len());
        let render = RenderConfig::new(6).with_highlight(closed, [70, 160, 230]);
        render_grid_to_png(&grid, &render, out)?;
    }
    Ok(())
}
