//! Halting when the population dies out.

use colony_core::ProcessId;
use colony_layer::{Agent, CellIndex, CellLayer};
use colony_sched::{HaltCondition, Process, ProcessKind, StepContext};

/// Every step, halts with [`HaltCondition::Extinction`] once the occupied
/// fraction of the active sites is at or below `threshold`.
///
/// With the default threshold of 0 this fires only when no active site is
/// occupied. The active sites default to the whole geometry.
#[derive(Clone, Debug)]
pub struct CheckForExtinction {
    id: ProcessId,
    threshold: f64,
    active: Option<CellIndex>,
}

impl CheckForExtinction {
    /// Halt when every active site is vacant.
    pub fn new(id: ProcessId) -> Self {
        Self {
            id,
            threshold: 0.0,
            active: None,
        }
    }

    /// Halt once the occupied fraction is at or below `threshold`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Only count `sites`.
    pub fn with_active_sites(mut self, sites: CellIndex) -> Self {
        self.active = Some(sites);
        self
    }

    /// Occupied fraction of the active sites. An empty site set counts as
    /// fully vacant.
    pub fn occupied_fraction<A: Agent>(&self, layer: &CellLayer<A>) -> f64 {
        let (occupied, total) = match &self.active {
            Some(active) => (
                active.iter().filter(|c| layer.is_occupied(c)).count(),
                active.len(),
            ),
            None => (layer.occupied_count(), layer.geometry().site_count()),
        };
        if total == 0 {
            0.0
        } else {
            occupied as f64 / total as f64
        }
    }
}

impl<A: Agent> Process<A> for CheckForExtinction {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "check-for-extinction"
    }

    fn kind(&self) -> ProcessKind {
        ProcessKind::EveryStep
    }

    fn fire(&mut self, ctx: &mut StepContext<'_, A>) -> Result<(), HaltCondition> {
        let fraction = self.occupied_fraction(ctx.layer());
        if fraction <= self.threshold {
            log::debug!(
                "occupied fraction {fraction} at or below {} at t={}",
                self.threshold,
                ctx.time()
            );
            return Err(HaltCondition::Extinction {
                time: ctx.time(),
                frame: ctx.frame(),
            });
        }
        Ok(())
    }
}
