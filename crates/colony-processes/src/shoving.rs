//! Division that makes room by shoving neighbours along.
//!
//! The daughter is aimed at a neighbouring site whether or not it is
//! free. Whichever of parent and target sits closer to a vacancy gets
//! pushed one step along the shortest path to it, so the colony grows
//! along the path of least resistance. Equal distances are settled with
//! a coin toss.

use colony_core::{Coordinate, ProcessId};
use colony_layer::{Agent, CellLayer, LayerError};
use colony_sched::{
    GillespieState, HaltCondition, Process, SchedError, StepContext, UniformSource,
};
use colony_space::BoundaryMode;
use indexmap::IndexSet;

use crate::divide::DIVISION_CHANNEL;

/// A divisible agent, chosen uniformly, divides toward a neighbour chosen
/// uniformly, shoving agents out of the way as needed.
///
/// Weight is `rate × divisible agents`, as for [`Divide`](crate::Divide).
/// A layer with no vacancy at all turns the event into a no-op.
#[derive(Clone, Debug)]
pub struct ShovingDivide {
    id: ProcessId,
    rate: f64,
}

impl ShovingDivide {
    /// Per-agent division rate.
    pub fn new(id: ProcessId, rate: f64) -> Self {
        Self { id, rate }
    }

    /// Per-agent division rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

fn targets<A: Agent>(layer: &CellLayer<A>, parent: &Coordinate) -> Result<Vec<Coordinate>, LayerError> {
    let neighbors = layer.geometry().neighbors(parent, BoundaryMode::Apply)?;
    let unique: IndexSet<Coordinate> = neighbors
        .into_iter()
        .filter(|n| !n.is_end_of_world() && n != parent)
        .map(Coordinate::canonical)
        .collect();
    Ok(unique.into_iter().collect())
}

fn pick(mut paths: Vec<Vec<Coordinate>>, rng: &mut dyn UniformSource) -> Option<Vec<Coordinate>> {
    let i = match paths.len() {
        0 => return None,
        1 => 0,
        n => rng.next_index(n)?,
    };
    Some(paths.swap_remove(i))
}

impl<A: Agent> Process<A> for ShovingDivide {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "shoving-divide"
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
        let targets = targets(layer, &parent)?;
        let Some(j) = rng.next_index(targets.len()) else {
            return Ok(());
        };
        let target = targets[j];

        let from_parent = pick(layer.nearest_vacancy_paths(&parent)?, rng);
        let from_target = pick(layer.nearest_vacancy_paths(&target)?, rng);
        let (Some(parent_path), Some(target_path)) = (from_parent, from_target) else {
            log::trace!("no vacancy reachable from {parent}");
            return Ok(());
        };

        // Path lengths include the start site.
        let shove_parent = match parent_path.len().cmp(&target_path.len()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => rng.next_uniform() < 0.5,
        };
        let daughter_site = if shove_parent {
            layer.shove(&parent_path)?;
            layer.divide(&parent_path[1], &parent)?;
            parent
        } else {
            layer.shove(&target_path)?;
            layer.divide(&parent, &target)?;
            target
        };
        state.highlight(DIVISION_CHANNEL, &daughter_site);
        Ok(())
    }
}
