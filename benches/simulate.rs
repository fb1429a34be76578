use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use thompson_split::{change_points, BanditSimulator, SeededSource, SimulationConfig};

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    for &window in &[1usize, 10, 60] {
        let cfg = SimulationConfig {
            window,
            ..SimulationConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("window", window), &cfg, |b, cfg| {
            b.iter(|| {
                let mut sim = BanditSimulator::new(cfg, SeededSource::new(123)).unwrap();
                sim.run();
                black_box(sim.terminal_a().total_trials());
            })
        });
    }

    // Heavier traffic: the per-trial window sum dominates.
    let heavy = SimulationConfig {
        duration: 200,
        window: 20,
        traffic: change_points([(0, 500)]),
        terminal_a: change_points([(0, 0.6), (100, 0.4)]),
        terminal_b: change_points([(0, 0.5)]),
    };
    group.bench_function("heavy", |b| {
        b.iter(|| {
            let mut sim = BanditSimulator::new(&heavy, SeededSource::new(7)).unwrap();
            sim.run();
            black_box(sim.report());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_simulate);
criterion_main!(benches);
