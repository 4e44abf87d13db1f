//! The [`Process`] trait and the context it fires in.

use crate::draw::UniformSource;
use crate::error::SchedError;
use crate::gillespie::GillespieState;
use crate::halt::HaltCondition;
use crate::step::StepState;
use colony_core::ProcessId;
use colony_layer::{Agent, CellLayer};

/// When a process runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcessKind {
    /// Competes for selection each event, proportionally to the weight it
    /// registers in [`Process::target`].
    #[default]
    Stochastic,
    /// Runs after every selected event, in registration order.
    EveryStep,
}

/// Mutable access handed to a firing process.
///
/// Bundles the layer, the event's [`StepState`], and the scheduler's
/// random source so processes never reach for global randomness.
pub struct StepContext<'a, A: Agent> {
    layer: &'a mut CellLayer<A>,
    state: &'a mut StepState,
    rng: &'a mut dyn UniformSource,
}

impl<'a, A: Agent> StepContext<'a, A> {
    /// Construct a context. Typically called by the scheduler.
    pub fn new(
        layer: &'a mut CellLayer<A>,
        state: &'a mut StepState,
        rng: &'a mut dyn UniformSource,
    ) -> Self {
        Self { layer, state, rng }
    }

    /// Read access to the layer.
    pub fn layer(&self) -> &CellLayer<A> {
        &*self.layer
    }

    /// Mutable access to the layer.
    pub fn layer_mut(&mut self) -> &mut CellLayer<A> {
        &mut *self.layer
    }

    /// The event state.
    pub fn state(&self) -> &StepState {
        &*self.state
    }

    /// Mutable event state, for highlights.
    pub fn state_mut(&mut self) -> &mut StepState {
        &mut *self.state
    }

    /// The random source.
    pub fn rng(&mut self) -> &mut dyn UniformSource {
        &mut *self.rng
    }

    /// Layer, state and random source borrowed together.
    pub fn split(&mut self) -> (&mut CellLayer<A>, &mut StepState, &mut dyn UniformSource) {
        (&mut *self.layer, &mut *self.state, &mut *self.rng)
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.state.time()
    }

    /// Current frame.
    pub fn frame(&self) -> u64 {
        self.state.frame()
    }
}

/// A unit of simulation behaviour: division, death, growth, a check.
///
/// # Contract
///
/// - `target` only reads the layer and registers at most one entry under
///   [`id`](Process::id).
/// - `fire` mutates the layer exclusively through its update operations
///   and draws randomness only from the context.
///
/// # Object safety
///
/// The scheduler stores processes as `Vec<Box<dyn Process<A>>>`.
pub trait Process<A: Agent>: Send + 'static {
    /// Unique id; selection order follows ascending ids.
    fn id(&self) -> ProcessId;

    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Whether the process competes for selection or runs every event.
    fn kind(&self) -> ProcessKind {
        ProcessKind::Stochastic
    }

    /// Register this process's propensity against the current layer.
    ///
    /// Every-step processes keep the default, which registers nothing.
    fn target(&self, layer: &CellLayer<A>, state: &mut GillespieState) -> Result<(), SchedError> {
        let _ = (layer, state);
        Ok(())
    }

    /// Carry out one event.
    fn fire(&mut self, ctx: &mut StepContext<'_, A>) -> Result<(), HaltCondition>;
}
