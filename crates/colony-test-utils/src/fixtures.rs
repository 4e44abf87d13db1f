//! Reusable geometry, layer, and process fixtures.
//!
//! Geometries:
//!
//! - [`hex_arena`]: triangular hexagon with arena boundary.
//! - [`rect`]: rectangular lattice rectangle with any boundary.
//! - [`line`]: linear lattice line with any boundary.
//!
//! Processes:
//!
//! - [`ConstProcess`]: fixed weight, counts how often it fires.
//! - [`FailingProcess`]: fails deterministically after N fires.
//! - [`CountingCheck`]: every-step process that counts its runs.

use crate::MockAgent;
use colony_core::{Coordinate, ProcessId, StateId};
use colony_layer::{CellLayer, LayerError};
use colony_sched::{
    GillespieState, HaltCondition, Process, ProcessKind, SchedError, StepContext,
};
use colony_space::{BoundaryKind, Geometry, Lattice, Shape};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Geometries ─────────────────────────────────────────────────────

/// Hexagon of `radius` on the triangular lattice, arena boundary.
pub fn hex_arena(radius: u32) -> Arc<Geometry> {
    let shape = Shape::hexagon(Lattice::Triangular, radius).unwrap();
    Arc::new(Geometry::new(Lattice::Triangular, shape, BoundaryKind::Arena).unwrap())
}

/// `width` x `height` rectangle on the rectangular lattice.
pub fn rect(width: u32, height: u32, boundary: BoundaryKind) -> Arc<Geometry> {
    let shape = Shape::rectangle(Lattice::Rectangular, width, height).unwrap();
    Arc::new(Geometry::new(Lattice::Rectangular, shape, boundary).unwrap())
}

/// Line of `length` sites on the linear lattice.
pub fn line(length: u32, boundary: BoundaryKind) -> Arc<Geometry> {
    let shape = Shape::line(Lattice::Linear, length).unwrap();
    Arc::new(Geometry::new(Lattice::Linear, shape, boundary).unwrap())
}

// ── Layers ─────────────────────────────────────────────────────────

/// A layer over `geometry` with one agent at each of `sites`.
pub fn seeded_layer(
    geometry: Arc<Geometry>,
    sites: &[Coordinate],
    make: impl Fn() -> MockAgent,
) -> CellLayer<MockAgent> {
    let mut layer = CellLayer::new(geometry);
    for site in sites {
        layer.place(make(), site).unwrap();
    }
    layer
}

/// A layer with a single ready-to-divide agent at the geometry's centre.
pub fn founder_layer(geometry: Arc<Geometry>) -> CellLayer<MockAgent> {
    let center = geometry.center();
    seeded_layer(geometry, &[center], MockAgent::ready)
}

/// Fill every canonical site with `make()`.
pub fn fill(layer: &mut CellLayer<MockAgent>, make: impl Fn() -> MockAgent) {
    for site in layer.geometry().canonical_sites() {
        if !layer.is_occupied(&site) {
            layer.place(make(), &site).unwrap();
        }
    }
}

/// Count agents in `state`, asserting the index agrees with a full scan.
pub fn checked_state_count(layer: &CellLayer<MockAgent>, state: StateId) -> usize {
    let scanned = layer
        .occupied_sites()
        .iter()
        .filter(|c| layer.state_at(c) == Some(state))
        .count();
    assert_eq!(scanned, layer.state_count(state), "state index out of sync");
    scanned
}

// ── Processes ──────────────────────────────────────────────────────

/// Registers a fixed weight and does nothing but count fires.
pub struct ConstProcess {
    pub id: ProcessId,
    pub weight: f64,
    fired: Arc<AtomicUsize>,
}

impl ConstProcess {
    pub fn new(id: u32, weight: f64) -> Self {
        Self {
            id: ProcessId(id),
            weight,
            fired: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, readable after the process is boxed.
    pub fn fired_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fired)
    }
}

impl Process<MockAgent> for ConstProcess {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "const"
    }

    fn target(
        &self,
        _layer: &CellLayer<MockAgent>,
        state: &mut GillespieState,
    ) -> Result<(), SchedError> {
        state.add(self.id, 1, self.weight)
    }

    fn fire(&mut self, _ctx: &mut StepContext<'_, MockAgent>) -> Result<(), HaltCondition> {
        self.fired.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Fires successfully `succeed_count` times, then reports a layer fault.
pub struct FailingProcess {
    pub id: ProcessId,
    succeed_count: usize,
    calls: usize,
}

impl FailingProcess {
    pub fn new(id: u32, succeed_count: usize) -> Self {
        Self {
            id: ProcessId(id),
            succeed_count,
            calls: 0,
        }
    }
}

impl Process<MockAgent> for FailingProcess {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn target(
        &self,
        _layer: &CellLayer<MockAgent>,
        state: &mut GillespieState,
    ) -> Result<(), SchedError> {
        state.add(self.id, 1, 1.0)
    }

    fn fire(&mut self, _ctx: &mut StepContext<'_, MockAgent>) -> Result<(), HaltCondition> {
        self.calls += 1;
        if self.calls > self.succeed_count {
            return Err(LayerError::Vacant {
                coord: Coordinate::planar(0, 0),
            }
            .into());
        }
        Ok(())
    }
}

/// Every-step process that counts its runs.
pub struct CountingCheck {
    pub id: ProcessId,
    runs: Arc<AtomicUsize>,
}

impl CountingCheck {
    pub fn new(id: u32) -> Self {
        Self {
            id: ProcessId(id),
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn runs_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.runs)
    }
}

impl Process<MockAgent> for CountingCheck {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "counting-check"
    }

    fn kind(&self) -> ProcessKind {
        ProcessKind::EveryStep
    }

    fn fire(&mut self, _ctx: &mut StepContext<'_, MockAgent>) -> Result<(), HaltCondition> {
        self.runs.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
