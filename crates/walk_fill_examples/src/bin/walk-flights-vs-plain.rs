use walk_fill::prelude::*;
use walk_fill_examples::{init_tracing, render_grid_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let base = GenerationConfig::new(96, 96)
        .with_target_fill_fraction(0.35)
        .with_seed(7);

    // Same seed: without flights the walk clusters, with flights it seeds new islands.
    let variants = [
        ("walk-plain.png", base.clone()),
        ("walk-flights-short.png", base.clone().with_flights(0.02, (4, 10))),
        ("walk-flights-long.png", base.with_flights(0.02, (20, 40))),
    ];

    for (out, config) in variants {
        let mut session = GenerationSession::headless(config)?;
        let mut log = EventLog::new();
        session.generate()?;
        // Pacing does not matter offline; the manual clock never waits.
        session.run_with_events(&mut ManualClock::new(), &mut log)?;

        if let Some(grid) = session.grid() {
            render_grid_to_png(grid, &RenderConfig::new(6), out)?;
        }
        println!("{out}: {} flights", log.flight_count());
    }
    Ok(())
}
