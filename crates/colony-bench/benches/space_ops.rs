//! Criterion micro-benchmarks for lattice and geometry queries.

use criterion::{criterion_group, criterion_main, Criterion};
use colony_bench::reference_geometry;
use colony_core::Coordinate;
use colony_space::{BoundaryKind, BoundaryMode, Geometry, Lattice, Shape};
use std::hint::black_box;

/// Benchmark: neighbors() with boundary applied on every site of a ~10K hexagon.
fn bench_neighbors_hexagon_10k(c: &mut Criterion) {
    let geometry = reference_geometry(57);
    let sites = geometry.canonical_sites();

    c.bench_function("neighbors_hexagon_10k", |b| {
        b.iter(|| {
            for site in &sites {
                let n = geometry.neighbors(site, BoundaryMode::Apply).unwrap();
                black_box(&n);
            }
        });
    });
}

/// Benchmark: neighbors() on a 100x100 periodic rectangle, where most
/// edge lookups wrap.
fn bench_neighbors_torus_10k(c: &mut Criterion) {
    let shape = Shape::rectangle(Lattice::Rectangular, 100, 100).unwrap();
    let geometry = Geometry::new(Lattice::Rectangular, shape, BoundaryKind::Periodic).unwrap();
    let sites = geometry.canonical_sites();

    c.bench_function("neighbors_torus_10k", |b| {
        b.iter(|| {
            for site in &sites {
                let n = geometry.neighbors(site, BoundaryMode::Apply).unwrap();
                black_box(&n);
            }
        });
    });
}

/// Benchmark: triangular displacement for 1000 deterministic site pairs.
fn bench_displacement_triangular(c: &mut Criterion) {
    let geometry = reference_geometry(20);
    let sites = geometry.canonical_sites();
    let n = sites.len() as u64;
    let pairs: Vec<(Coordinate, Coordinate)> = (0u64..1000)
        .map(|i| {
            let a = i.wrapping_mul(6364136223846793007) % n;
            let b = (i + 500).wrapping_mul(1442695040888963407) % n;
            (sites[a as usize], sites[b as usize])
        })
        .collect();

    c.bench_function("displacement_triangular_1k", |b| {
        b.iter(|| {
            for (p, q) in &pairs {
                black_box(geometry.displacement(p, q).unwrap());
            }
        });
    });
}

/// Benchmark: build a radius-57 hexagon from scratch.
fn bench_build_hexagon(c: &mut Criterion) {
    c.bench_function("build_hexagon_10k", |b| {
        b.iter(|| black_box(Shape::hexagon(Lattice::Triangular, 57).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_neighbors_hexagon_10k,
    bench_neighbors_torus_10k,
    bench_displacement_triangular,
    bench_build_hexagon
);
criterion_main!(benches);
