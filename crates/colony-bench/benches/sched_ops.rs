//! Criterion benchmarks for event selection and full scheduler steps.

use criterion::{criterion_group, criterion_main, Criterion};
use colony_bench::{reference_geometry, reference_processes, seeded_population};
use colony_core::ProcessId;
use colony_sched::{GillespieChooser, GillespieState, RangeMap, Scheduler, SchedulerConfig};
use std::hint::black_box;

/// Benchmark: 1000 selections from a 1000-entry range map.
fn bench_range_map_select(c: &mut Criterion) {
    let mut map = RangeMap::new();
    for k in 0..1000u32 {
        map.add(k, 1.0 + f64::from(k % 7)).unwrap();
    }
    let total = map.total_weight();
    let draws: Vec<f64> = (0..1000).map(|i| total * f64::from(i) / 1000.0).collect();

    c.bench_function("range_map_select_1k", |b| {
        b.iter(|| {
            for x in &draws {
                black_box(map.select_target(*x).unwrap());
            }
        });
    });
}

/// Benchmark: gather weights and build a chooser over a 10K-site layer.
fn bench_gather_10k(c: &mut Criterion) {
    let layer = seeded_population(reference_geometry(57), 0.5, 42);
    let scheduler = Scheduler::new(SchedulerConfig::default(), reference_processes()).unwrap();

    c.bench_function("gather_and_choose_10k", |b| {
        b.iter(|| {
            let gs: GillespieState = scheduler.gather(&layer).unwrap();
            let chooser = GillespieChooser::new(&gs).unwrap();
            black_box(chooser.select_target(0.0).unwrap_or(ProcessId(0)));
        });
    });
}

/// Benchmark: 100 full scheduler steps on a half-filled ~10K hexagon.
fn bench_100_steps_10k(c: &mut Criterion) {
    c.bench_function("100_steps_10k", |b| {
        b.iter(|| {
            let mut layer = seeded_population(reference_geometry(57), 0.5, 42);
            let config = SchedulerConfig {
                seed: 42,
                max_steps: Some(100),
                max_time: None,
            };
            let mut scheduler = Scheduler::new(config, reference_processes()).unwrap();
            black_box(scheduler.run(&mut layer));
        });
    });
}

criterion_group!(
    benches,
    bench_range_map_select,
    bench_gather_10k,
    bench_100_steps_10k
);
criterion_main!(benches);
