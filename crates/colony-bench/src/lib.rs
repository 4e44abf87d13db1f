//! Benchmark profiles and utilities for Colony.
//!
//! - [`reference_geometry`]: triangular hexagon with an arena boundary
//! - [`reference_processes`]: division, death, growth, and extinction check
//! - [`seeded_population`]: deterministic partial fill of a layer

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use colony_core::{ProcessId, StateId};
use colony_layer::CellLayer;
use colony_processes::{CheckForExtinction, Death, Divide, UniformBiomassGrowth};
use colony_sched::Process;
use colony_space::{BoundaryKind, Geometry, Lattice, Shape};
use colony_test_utils::MockAgent;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Hexagon of `radius` on the triangular lattice, arena boundary.
///
/// Radius 57 gives 9,919 sites.
pub fn reference_geometry(radius: u32) -> Arc<Geometry> {
    let shape = Shape::hexagon(Lattice::Triangular, radius).unwrap();
    Arc::new(Geometry::new(Lattice::Triangular, shape, BoundaryKind::Arena).unwrap())
}

/// Divide(1.0), Death(0.1), UniformBiomassGrowth(0.25), CheckForExtinction.
pub fn reference_processes() -> Vec<Box<dyn Process<MockAgent>>> {
    vec![
        Box::new(Divide::new(ProcessId(0), 1.0)),
        Box::new(Death::new(ProcessId(1), 0.1)),
        Box::new(UniformBiomassGrowth::new(ProcessId(2), 0.25)),
        Box::new(CheckForExtinction::new(ProcessId(3))),
    ]
}

/// A layer over `geometry` with roughly `fraction` of its sites occupied.
///
/// Each site is kept independently with probability `fraction`; every
/// other occupant starts ready to divide.
pub fn seeded_population(geometry: Arc<Geometry>, fraction: f64, seed: u64) -> CellLayer<MockAgent> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut layer = CellLayer::new(Arc::clone(&geometry));
    for (i, site) in geometry.canonical_sites().iter().enumerate() {
        if rng.random_bool(fraction) {
            let health = if i % 2 == 0 { 1.0 } else { 0.5 };
            layer.place(MockAgent::new(StateId(1), health), site).unwrap();
        }
    }
    layer
}
