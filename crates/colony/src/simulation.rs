//! Single-threaded simulation driver.
//!
//! [`Simulation`] bundles one geometry, the [`CellLayer`] living on it,
//! and the [`Scheduler`] that drives it. It is [`Send`] whenever the agent
//! type is, so a whole run can be moved onto a worker thread.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use colony_core::{AgentId, Coordinate};
use colony_layer::{Agent, CellLayer, LayerError};
use colony_sched::{
    ConfigError, HaltCondition, Process, Scheduler, SchedulerConfig, StepReport,
};
use colony_space::{Geometry, GeometryConfig, SpaceError};

// ── SimulationConfig ────────────────────────────────────────────

/// Everything needed to build a [`Simulation`] apart from its processes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationConfig {
    /// Lattice, shape, and boundary.
    pub geometry: GeometryConfig,
    /// Seed and run limits.
    pub scheduler: SchedulerConfig,
}

impl SimulationConfig {
    /// Validate both halves.
    pub fn validate(&self) -> Result<(), BuildError> {
        self.geometry.validate()?;
        self.scheduler.validate()?;
        Ok(())
    }
}

// ── BuildError ──────────────────────────────────────────────────

/// Errors from [`Simulation::new`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// The geometry could not be built.
    Geometry(SpaceError),
    /// The scheduler configuration was rejected.
    Scheduler(ConfigError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(e) => write!(f, "geometry: {e}"),
            Self::Scheduler(e) => write!(f, "scheduler: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::Scheduler(e) => Some(e),
        }
    }
}

impl From<SpaceError> for BuildError {
    fn from(e: SpaceError) -> Self {
        Self::Geometry(e)
    }
}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        Self::Scheduler(e)
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// A layer of agents driven by a scheduler.
///
/// # Example
///
/// ```ignore
/// let mut sim = Simulation::new(config, processes)?;
/// sim.place(founder, &sim.geometry().center())?;
/// let halt = sim.run();
/// ```
pub struct Simulation<A: Agent> {
    layer: CellLayer<A>,
    scheduler: Scheduler<A>,
}

impl<A: Agent> Simulation<A> {
    /// Build the geometry, an empty layer, and the scheduler.
    pub fn new(
        config: SimulationConfig,
        processes: Vec<Box<dyn Process<A>>>,
    ) -> Result<Self, BuildError> {
        let geometry = config.geometry.build()?;
        log::info!(
            "simulation: {:?} lattice, {} sites, {:?} boundary",
            geometry.lattice(),
            geometry.site_count(),
            geometry.boundary_kind()
        );
        let scheduler = Scheduler::new(config.scheduler, processes)?;
        Ok(Self {
            layer: CellLayer::new(Arc::new(geometry)),
            scheduler,
        })
    }

    /// The shared geometry.
    pub fn geometry(&self) -> &Arc<Geometry> {
        self.layer.geometry()
    }

    /// The layer.
    pub fn layer(&self) -> &CellLayer<A> {
        &self.layer
    }

    /// Mutable layer, for seeding or interventions between steps.
    pub fn layer_mut(&mut self) -> &mut CellLayer<A> {
        &mut self.layer
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &Scheduler<A> {
        &self.scheduler
    }

    /// Put `agent` on the vacant site `coord`.
    pub fn place(&mut self, agent: A, coord: &Coordinate) -> Result<AgentId, LayerError> {
        self.layer.place(agent, coord)
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.scheduler.time()
    }

    /// Events completed.
    pub fn frame(&self) -> u64 {
        self.scheduler.frame()
    }

    /// Run one event.
    pub fn step(&mut self) -> Result<StepReport, HaltCondition> {
        self.scheduler.step(&mut self.layer)
    }

    /// Step until a halt condition is reached.
    pub fn run(&mut self) -> HaltCondition {
        self.scheduler.run(&mut self.layer)
    }

    /// Empty the layer and rewind the scheduler with a new seed.
    pub fn reset(&mut self, seed: u64) {
        self.layer.clear();
        self.scheduler.reset(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::ProcessId;
    use colony_processes::{CheckForExtinction, Death, Divide};
    use colony_space::{BoundaryKind, Lattice, ShapeKind};
    use colony_test_utils::MockAgent;

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            geometry: GeometryConfig {
                lattice: Lattice::Triangular,
                shape: ShapeKind::Hexagon { radius: 3 },
                boundary: BoundaryKind::Arena,
            },
            scheduler: SchedulerConfig {
                seed,
                max_steps: Some(200),
                max_time: None,
            },
        }
    }

    fn processes() -> Vec<Box<dyn Process<MockAgent>>> {
        vec![
            Box::new(Divide::new(ProcessId(0), 1.0)),
            Box::new(CheckForExtinction::new(ProcessId(1))),
        ]
    }

    #[test]
    fn division_fills_the_hexagon() {
        let mut cfg = config(1);
        cfg.scheduler.max_steps = Some(5_000);
        let mut sim = Simulation::new(cfg, processes()).unwrap();
        let center = sim.geometry().center();
        // Threshold 0.0: every agent stays divisible.
        sim.place(MockAgent::ready().with_threshold(0.0), &center)
            .unwrap();
        let halt = sim.run();
        assert_eq!(halt, HaltCondition::StepLimit { frame: 5_000 });
        assert_eq!(sim.layer().occupied_count(), 37);
        assert_eq!(sim.layer().divisible_count(), 37);
    }

    #[test]
    fn death_only_run_goes_extinct() {
        let mut sim = Simulation::<MockAgent>::new(
            config(5),
            vec![Box::new(Death::new(ProcessId(0), 1.0))],
        )
        .unwrap();
        for y in 0..3 {
            sim.place(MockAgent::ready(), &Coordinate::planar(3, y + 2))
                .unwrap();
        }
        assert!(matches!(sim.run(), HaltCondition::Extinction { frame: 3, .. }));
        assert!(sim.time() > 0.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut sim = Simulation::new(config(1), processes()).unwrap();
        let center = sim.geometry().center();
        sim.place(MockAgent::ready(), &center).unwrap();
        sim.step().unwrap();
        sim.reset(2);
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.layer().occupied_count(), 0);
        assert_eq!(sim.scheduler().config().seed, 2);
    }

    #[test]
    fn bad_config_is_rejected() {
        let mut cfg = config(0);
        cfg.geometry.boundary = BoundaryKind::Periodic;
        assert!(matches!(
            Simulation::<MockAgent>::new(cfg, processes()),
            Err(BuildError::Geometry(SpaceError::UnsupportedBoundary { .. }))
        ));
        let mut cfg = config(0);
        cfg.scheduler.max_steps = Some(0);
        assert_eq!(cfg.validate(), Err(BuildError::Scheduler(ConfigError::ZeroMaxSteps)));
    }
}
