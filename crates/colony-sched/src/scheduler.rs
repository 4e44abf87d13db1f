//! The event loop: select a process, fire it, advance the clock.

use crate::config::{ConfigError, SchedulerConfig};
use crate::draw::UniformSource;
use crate::gillespie::{GillespieChooser, GillespieState};
use crate::halt::HaltCondition;
use crate::process::{Process, ProcessKind, StepContext};
use crate::step::StepState;
use crate::SchedError;
use colony_core::ProcessId;
use colony_layer::{Agent, CellLayer};
use indexmap::IndexSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Outcome of one successful [`Scheduler::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// The stochastic process that was selected and fired.
    pub fired: ProcessId,
    /// Clock, frame, and highlights recorded during the event.
    pub state: StepState,
}

/// Owns the processes, the random generator, and the simulation clock.
///
/// Each [`step`](Scheduler::step):
///
/// 1. asks every stochastic process to register its weight,
/// 2. draws the next process in proportion to weight,
/// 3. fires it and advances the clock by an exponential waiting time,
/// 4. runs every every-step process in registration order,
/// 5. reports [`HaltCondition::Extinction`] if the event emptied the layer.
///
/// When no stochastic process has weight, the every-step processes run
/// once against the unchanged clock and the weights are gathered again.
/// Only if they are still zero does the step report
/// [`HaltCondition::Stalled`].
pub struct Scheduler<A: Agent> {
    config: SchedulerConfig,
    processes: Vec<Box<dyn Process<A>>>,
    rng: ChaCha8Rng,
    time: f64,
    frame: u64,
}

impl<A: Agent> Scheduler<A> {
    /// Validate `config` and take ownership of `processes`.
    pub fn new(
        config: SchedulerConfig,
        processes: Vec<Box<dyn Process<A>>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seen = IndexSet::new();
        for process in &processes {
            if !seen.insert(process.id()) {
                return Err(ConfigError::DuplicateProcess { id: process.id() });
            }
        }
        log::debug!(
            "scheduler ready: {} processes, seed {}",
            processes.len(),
            config.seed
        );
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            processes,
            time: 0.0,
            frame: 0,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Events completed.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Rewind the clock to zero and reseed the generator with `seed`.
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.time = 0.0;
        self.frame = 0;
    }

    /// Ids of the owned processes in registration order.
    pub fn process_ids(&self) -> Vec<ProcessId> {
        self.processes.iter().map(|p| p.id()).collect()
    }

    /// Register every stochastic process's weight against `layer`.
    pub fn gather(&self, layer: &CellLayer<A>) -> Result<GillespieState, SchedError> {
        let mut gs = GillespieState::new();
        for process in &self.processes {
            if process.kind() == ProcessKind::Stochastic {
                process.target(layer, &mut gs)?;
            }
        }
        Ok(gs)
    }

    /// Run one event.
    pub fn step(&mut self, layer: &mut CellLayer<A>) -> Result<StepReport, HaltCondition> {
        if let Some(max) = self.config.max_steps {
            if self.frame >= max {
                return Err(HaltCondition::StepLimit { frame: self.frame });
            }
        }
        if let Some(max) = self.config.max_time {
            if self.time >= max {
                return Err(HaltCondition::TimeLimit { time: self.time });
            }
        }

        let occupied_before = layer.occupied_count();
        let mut gs = self.gather(layer)?;

        if gs.total_weight() <= 0.0 {
            // Every-step processes may make an event possible (growth can
            // make an agent divisible), so weights are gathered again
            // before giving up.
            let mut idle = StepState::new(self.time, self.frame);
            self.run_every_step(layer, &mut idle)?;
            gs = self.gather(layer)?;
            if gs.total_weight() <= 0.0 {
                return Err(HaltCondition::Stalled {
                    time: self.time,
                    frame: self.frame,
                });
            }
            log::trace!("frame {}: every-step processes revived the weights", self.frame);
        }
        let total = gs.total_weight();

        let chooser = GillespieChooser::new(&gs)?;
        let fired = chooser.select_target(self.rng.next_below(total))?;
        let wait = self.rng.next_exponential(total);
        let process = self
            .processes
            .iter_mut()
            .find(|p| p.id() == fired)
            .ok_or(SchedError::UnknownProcess { id: fired })?;
        log::trace!(
            "frame {}: firing {} ({fired}) of total weight {total}",
            self.frame,
            process.name()
        );
        let mut state = StepState::new(self.time, self.frame + 1);
        {
            let mut ctx = StepContext::new(layer, &mut state, &mut self.rng);
            process.fire(&mut ctx)?;
        }
        state.advance_clock(wait);
        self.time = state.time();
        self.frame = state.frame();

        self.run_every_step(layer, &mut state)?;

        if occupied_before > 0 && layer.occupied_count() == 0 {
            log::debug!("extinction at t={} (frame {})", self.time, self.frame);
            return Err(HaltCondition::Extinction {
                time: self.time,
                frame: self.frame,
            });
        }
        Ok(StepReport { fired, state })
    }

    fn run_every_step(
        &mut self,
        layer: &mut CellLayer<A>,
        state: &mut StepState,
    ) -> Result<(), HaltCondition> {
        for process in self
            .processes
            .iter_mut()
            .filter(|p| p.kind() == ProcessKind::EveryStep)
        {
            let mut ctx = StepContext::new(layer, state, &mut self.rng);
            process.fire(&mut ctx)?;
        }
        Ok(())
    }

    /// Step until a halt condition is reached and return it.
    pub fn run(&mut self, layer: &mut CellLayer<A>) -> HaltCondition {
        loop {
            if let Err(halt) = self.step(layer) {
                if halt.is_fault() {
                    log::warn!("run aborted at frame {}: {halt}", self.frame);
                } else {
                    log::debug!("run finished: {halt}");
                }
                return halt;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::{Coordinate, StateId};
    use colony_space::{BoundaryKind, Geometry, Lattice, Shape};
    use colony_test_utils::MockAgent;
    use std::sync::Arc;

    /// Removes the first occupied site; weight 1 per agent.
    struct Cull {
        id: ProcessId,
    }

    impl Process<MockAgent> for Cull {
        fn id(&self) -> ProcessId {
            self.id
        }

        fn name(&self) -> &str {
            "cull"
        }

        fn target(
            &self,
            layer: &CellLayer<MockAgent>,
            state: &mut GillespieState,
        ) -> Result<(), SchedError> {
            let n = layer.occupied_count();
            state.add(self.id, n, n as f64)
        }

        fn fire(&mut self, ctx: &mut StepContext<'_, MockAgent>) -> Result<(), HaltCondition> {
            let layer = ctx.layer_mut();
            if let Some(site) = layer.occupied_sites().first().copied() {
                layer.banish(&site)?;
            }
            Ok(())
        }
    }

    /// Counts how many times it ran.
    struct Tally {
        id: ProcessId,
        runs: u32,
    }

    impl Process<MockAgent> for Tally {
        fn id(&self) -> ProcessId {
            self.id
        }

        fn name(&self) -> &str {
            "tally"
        }

        fn kind(&self) -> ProcessKind {
            ProcessKind::EveryStep
        }

        fn fire(&mut self, ctx: &mut StepContext<'_, MockAgent>) -> Result<(), HaltCondition> {
            self.runs += 1;
            ctx.state_mut().highlight(0, &Coordinate::planar(0, 0));
            Ok(())
        }
    }

    fn layer_with(n: i32) -> CellLayer<MockAgent> {
        let shape = Shape::rectangle(Lattice::Rectangular, 4, 4).unwrap();
        let geometry = Geometry::new(Lattice::Rectangular, shape, BoundaryKind::Arena).unwrap();
        let mut layer = CellLayer::new(Arc::new(geometry));
        for y in 0..n {
            layer
                .place(MockAgent::new(StateId(1), 0.5), &Coordinate::planar(0, y))
                .unwrap();
        }
        layer
    }

    fn scheduler(config: SchedulerConfig) -> Scheduler<MockAgent> {
        Scheduler::new(
            config,
            vec![
                Box::new(Cull { id: ProcessId(1) }),
                Box::new(Tally {
                    id: ProcessId(2),
                    runs: 0,
                }),
            ],
        )
        .unwrap()
    }

    #[test]
    fn culling_ends_in_extinction_exactly_once() {
        let mut layer = layer_with(3);
        let mut s = scheduler(SchedulerConfig::default());
        for _ in 0..2 {
            let report = s.step(&mut layer).unwrap();
            assert_eq!(report.fired, ProcessId(1));
            assert!(report.state.highlights(0).is_some());
        }
        match s.step(&mut layer) {
            Err(HaltCondition::Extinction { frame, time }) => {
                assert_eq!(frame, 3);
                assert!(time > 0.0);
            }
            other => panic!("expected extinction, got {other:?}"),
        }
        // Nothing left to select: the next step stalls rather than
        // reporting extinction again.
        assert!(matches!(
            s.step(&mut layer),
            Err(HaltCondition::Stalled { .. })
        ));
    }

    #[test]
    fn clock_is_monotone() {
        let mut layer = layer_with(4);
        let mut s = scheduler(SchedulerConfig::default());
        let mut last = 0.0;
        while let Ok(report) = s.step(&mut layer) {
            assert!(report.state.time() >= last);
            assert_eq!(report.state.start_time(), last);
            last = report.state.time();
        }
        assert_eq!(s.time(), last);
    }

    #[test]
    fn step_limit_halts() {
        let mut layer = layer_with(4);
        let mut s = scheduler(SchedulerConfig {
            max_steps: Some(2),
            ..SchedulerConfig::default()
        });
        assert_eq!(s.run(&mut layer), HaltCondition::StepLimit { frame: 2 });
        assert_eq!(layer.occupied_count(), 2);
    }

    #[test]
    fn same_seed_same_history() {
        let run = |seed| {
            let mut layer = layer_with(4);
            let mut s = scheduler(SchedulerConfig {
                seed,
                ..SchedulerConfig::default()
            });
            let mut times = Vec::new();
            while let Ok(report) = s.step(&mut layer) {
                times.push(report.state.time());
            }
            times
        };
        assert_eq!(run(9), run(9));
        assert_ne!(run(9), run(10));
    }

    #[test]
    fn reset_replays_the_same_history() {
        let mut s = scheduler(SchedulerConfig::default());
        let mut layer = layer_with(2);
        let first = s.step(&mut layer).unwrap().state.time();
        s.reset(0);
        assert_eq!(s.frame(), 0);
        assert_eq!(s.time(), 0.0);
        let mut layer = layer_with(2);
        assert_eq!(s.step(&mut layer).unwrap().state.time(), first);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Scheduler::<MockAgent>::new(
            SchedulerConfig::default(),
            vec![
                Box::new(Cull { id: ProcessId(1) }),
                Box::new(Cull { id: ProcessId(1) }),
            ],
        );
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateProcess { id: ProcessId(1) })
        ));
    }

    #[test]
    fn empty_layer_stalls() {
        let mut layer = layer_with(0);
        let mut s = scheduler(SchedulerConfig::default());
        assert_eq!(
            s.step(&mut layer),
            Err(HaltCondition::Stalled {
                time: 0.0,
                frame: 0
            })
        );
    }
}
