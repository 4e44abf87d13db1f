//! Colony: lattice-based stochastic simulation of cell populations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Colony sub-crates and adds the [`Simulation`] driver. For most users,
//! adding `colony` as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use colony::prelude::*;
//!
//! #[derive(Clone)]
//! struct Blob {
//!     biomass: f64,
//! }
//!
//! impl Agent for Blob {
//!     fn state(&self) -> StateId { StateId(1) }
//!     fn is_divisible(&self) -> bool { self.biomass >= 1.0 }
//!     fn health(&self) -> f64 { self.biomass }
//!     fn adjust_health(&mut self, delta: f64) { self.biomass += delta; }
//!     fn divide(&mut self) -> Self {
//!         self.biomass /= 2.0;
//!         self.clone()
//!     }
//! }
//!
//! let config = SimulationConfig {
//!     geometry: GeometryConfig {
//!         lattice: Lattice::Triangular,
//!         shape: ShapeKind::Hexagon { radius: 4 },
//!         boundary: BoundaryKind::Arena,
//!     },
//!     scheduler: SchedulerConfig {
//!         seed: 42,
//!         max_steps: Some(500),
//!         max_time: None,
//!     },
//! };
//! let processes: Vec<Box<dyn Process<Blob>>> = vec![
//!     Box::new(Divide::new(ProcessId(0), 1.0)),
//!     Box::new(UniformBiomassGrowth::new(ProcessId(1), 0.5)),
//!     Box::new(CheckForExtinction::new(ProcessId(2))),
//! ];
//! let mut sim = Simulation::new(config, processes).unwrap();
//! let center = sim.geometry().center();
//! sim.place(Blob { biomass: 1.0 }, &center).unwrap();
//!
//! let halt = sim.run();
//! assert_eq!(halt, HaltCondition::StepLimit { frame: 500 });
//! assert!(sim.layer().occupied_count() > 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `colony-core` | Coordinates, flags, ids |
//! | [`space`] | `colony-space` | Lattices, shapes, boundaries, geometry |
//! | [`layer`] | `colony-layer` | Agent trait, occupancy index, cell layer |
//! | [`sched`] | `colony-sched` | Weighted selection, processes, scheduler |
//! | [`processes`] | `colony-processes` | Division, shoving division, death, growth, extinction check |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod simulation;

pub use simulation::{BuildError, Simulation, SimulationConfig};

/// Coordinates, flags, and ids (`colony-core`).
pub use colony_core as types;

/// Lattices, shapes, boundaries, and the [`space::Geometry`] that ties
/// them together (`colony-space`).
pub use colony_space as space;

/// The [`layer::Agent`] trait and the [`layer::CellLayer`] agents live on
/// (`colony-layer`).
pub use colony_layer as layer;

/// Weighted event selection and the [`sched::Scheduler`] (`colony-sched`).
///
/// The [`sched::Process`] trait is the main extension point for
/// user-defined simulation behaviour.
pub use colony_sched as sched;

/// Reference process implementations (`colony-processes`).
pub use colony_processes as processes;

/// Common imports for typical Colony usage.
///
/// ```rust
/// use colony::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use colony_core::{AgentId, Coordinate, Flags, ProcessId, StateId};

    // Space
    pub use colony_space::{
        BoundaryKind, BoundaryMode, Geometry, GeometryConfig, Lattice, Shape, ShapeKind,
        SpaceError,
    };

    // Layer
    pub use colony_layer::{Agent, CellIndex, CellLayer, LayerError};

    // Scheduling
    pub use colony_sched::{
        GillespieState, HaltCondition, Process, ProcessKind, SchedError, SchedulerConfig,
        StepContext, StepReport, StepState,
    };

    // Reference processes
    pub use colony_processes::{
        CheckForExtinction, Death, Divide, ShovingDivide, TargetedBiomassGrowth,
        UniformBiomassGrowth,
    };

    // Driver
    pub use crate::simulation::{BuildError, Simulation, SimulationConfig};
}
