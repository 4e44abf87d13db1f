//! Division into a vacant neighbouring site.

use colony_core::ProcessId;
use colony_layer::{Agent, CellLayer};
use colony_sched::{GillespieState, HaltCondition, Process, SchedError, StepContext};

/// Highlight channel [`Divide`] marks daughter sites on.
pub const DIVISION_CHANNEL: u32 = 0;

/// A divisible agent, chosen uniformly, divides into a vacant neighbour
/// chosen uniformly.
///
/// If the chosen agent has no vacant neighbour the event does nothing.
#[derive(Clone, Debug)]
pub struct Divide {
    id: ProcessId,
    rate: f64,
}

impl Divide {
    /// Per-agent division rate.
    pub fn new(id: ProcessId, rate: f64) -> Self {
        Self { id, rate }
    }

    /// Per-agent division rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl<A: Agent> Process<A> for Divide {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "divide"
    }

    fn target(&self, layer: &CellLayer<A>, state: &mut GillespieState) -> Result<(), SchedError> {
        let n = layer.divisible_count();
        state.add(self.id, n, self.rate * n as f64)
    }

    fn fire(&mut self, ctx: &mut StepContext<'_, A>) -> Result<(), HaltCondition> {
        let (layer, state, rng) = ctx.split();
        let candidates = layer.divisible_sites();
        let Some(i) = rng.next_index(candidates.len()) else {
            return Ok(());
        };
        let parent = candidates[i];
        let vacant = layer.vacant_neighbors(&parent)?;
        let Some(j) = rng.next_index(vacant.len()) else {
            log::trace!("no room to divide at {parent}");
            return Ok(());
        };
        let target = vacant[j];
        layer.divide(&parent, &target)?;
        state.highlight(DIVISION_CHANNEL, &target);
        Ok(())
    }
}
