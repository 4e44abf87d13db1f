//! Removal of a uniformly chosen agent.

use colony_core::ProcessId;
use colony_layer::{Agent, CellLayer};
use colony_sched::{GillespieState, HaltCondition, Process, SchedError, StepContext};

/// Banishes one agent chosen uniformly from the occupied sites.
#[derive(Clone, Debug)]
pub struct Death {
    id: ProcessId,
    rate: f64,
}

impl Death {
    /// Per-agent death rate.
    pub fn new(id: ProcessId, rate: f64) -> Self {
        Self { id, rate }
    }
}

impl<A: Agent> Process<A> for Death {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "death"
    }

    fn target(&self, layer: &CellLayer<A>, state: &mut GillespieState) -> Result<(), SchedError> {
        let n = layer.occupied_count();
        state.add(self.id, n, self.rate * n as f64)
    }

    fn fire(&mut self, ctx: &mut StepContext<'_, A>) -> Result<(), HaltCondition> {
        let (layer, _, rng) = ctx.split();
        let occupied = layer.occupied_sites();
        if let Some(i) = rng.next_index(occupied.len()) {
            layer.banish(&occupied[i])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::Coordinate;
    use colony_sched::StepState;
    use colony_space::BoundaryKind;
    use colony_test_utils::fixtures::{line, seeded_layer};
    use colony_test_utils::{FixedDraws, MockAgent};

    #[test]
    fn banishes_the_drawn_site() {
        let sites: Vec<_> = (0..4).map(|y| Coordinate::planar(0, y)).collect();
        let mut layer = seeded_layer(line(4, BoundaryKind::Arena), &sites, MockAgent::ready);
        let mut gs = GillespieState::new();
        let mut death = Death::new(ProcessId(1), 0.25);
        Process::<MockAgent>::target(&death, &layer, &mut gs).unwrap();
        assert_eq!(gs.weight(ProcessId(1)), Some(1.0));

        let mut state = StepState::new(0.0, 1);
        // 0.6 * 4 = 2.4: the third occupied site in canonical order.
        let mut rng = FixedDraws::new([0.6]);
        death
            .fire(&mut StepContext::new(&mut layer, &mut state, &mut rng))
            .unwrap();
        assert_eq!(layer.occupied_count(), 3);
        assert!(!layer.is_occupied(&Coordinate::planar(0, 2)));
    }
}
