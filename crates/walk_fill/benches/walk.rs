mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use walk_fill::prelude::*;

const SIZES: [u32; 3] = [32, 64, 128];
const FLIGHT_CHANCES: [f64; 3] = [0.0, 0.01, 0.1];

fn walk_fill_benches(c: &mut Criterion) {
    for &chance in &FLIGHT_CHANCES {
        let mut group = c.benchmark_group(format!("walk/fill_0.5/flights_{chance:.2}"));

        for &size in &SIZES {
            let config = common::seeded_config(size, 0.5, chance);
            group.throughput(common::cells_throughput(config.target_cells()));

            group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, config| {
                b.iter(|| {
                    let mut session =
                        GenerationSession::headless(config.clone()).expect("valid config");
                    session.generate().expect("unstarted");
                    while session.state() == SessionState::Running {
                        session.tick().expect("running");
                    }
                    black_box(session.filled_count());
                });
            });
        }

        group.finish();
    }
}

fn walk_step_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk/step");
    group.throughput(common::cells_throughput(1));

    let mut grid = Grid::new(256, 256);
    let mut stepper = WalkStepper::new(RandomSource::fixed(0xBEEF), 0.05, (3, 9));
    group.bench_function("single", |b| {
        b.iter(|| black_box(stepper.step(&mut grid)));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::walk_criterion();
    targets = walk_fill_benches, walk_step_benches
}
criterion_main!(benches);
