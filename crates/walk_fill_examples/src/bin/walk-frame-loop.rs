use std::thread;
use std::time::Duration;

use walk_fill::prelude::*;
use walk_fill_examples::{grid_to_ascii, init_tracing, render_tiles_to_png, RenderConfig};

const FRAME: Duration = Duration::from_millis(4);

fn main() -> anyhow::Result<()> {
    init_tracing();

    // The session ticks at most 120 times per second however fast frames arrive.
    let config = GenerationConfig::new(24, 12)
        .with_target_fill_fraction(0.3)
        .with_ticks_per_second(120.0)
        .with_flights(0.05, (3, 6))
        .with_hole_filling(HoleCheck::Cardinal4);

    let mut session = GenerationSession::try_new(config, ColorBuffer::with_size(24, 12))?;
    let mut clock = SystemClock::new();
    session.generate()?;

    let mut frames = 0u64;
    while session.poll(&mut clock) != SessionState::Done {
        frames += 1;
        if frames % 60 == 0 {
            if let (Some(grid), Some(walker)) = (session.grid(), session.walker()) {
                println!("frame {frames}:\n{}", grid_to_ascii(grid, Some(walker.position)));
            }
        }
        thread::sleep(FRAME);
    }

    if let Some(walker) = session.walker() {
        println!("{frames} frames for {} ticks", walker.ticks);
    }
    render_tiles_to_png(session.tiles(), &RenderConfig::new(16), "walk-frame-loop.png")?;
    session.clear()?;
    Ok(())
}
