//! Biomass growth applied every step.
//!
//! Both processes feed every eligible agent first and re-index afterwards,
//! so an agent's divisibility never changes partway through a sweep. With
//! `defer` set, re-indexing is left to whoever calls
//! [`CellLayer::apply`](colony_layer::CellLayer::apply) next.

use colony_core::{Coordinate, ProcessId, StateId};
use colony_layer::{Agent, CellIndex, CellLayer};
use colony_sched::{HaltCondition, Process, ProcessKind, StepContext};

fn feed<A: Agent>(
    layer: &mut CellLayer<A>,
    sites: &[Coordinate],
    delta: f64,
    defer: bool,
) -> Result<(), HaltCondition> {
    for site in sites {
        if let Some(agent) = layer.agent_mut(site) {
            agent.adjust_health(delta);
        }
    }
    if !defer {
        for site in sites {
            layer.apply(site)?;
        }
    }
    Ok(())
}

fn occupied_in<A: Agent>(layer: &CellLayer<A>, active: Option<&CellIndex>) -> Vec<Coordinate> {
    match active {
        Some(active) => active.iter().filter(|c| layer.is_occupied(c)).copied().collect(),
        None => layer.occupied_sites(),
    }
}

/// Adds `delta` health to every occupied site each step.
#[derive(Clone, Debug)]
pub struct UniformBiomassGrowth {
    id: ProcessId,
    delta: f64,
    defer: bool,
    active: Option<CellIndex>,
}

impl UniformBiomassGrowth {
    /// Grow every agent on the layer.
    pub fn new(id: ProcessId, delta: f64) -> Self {
        Self {
            id,
            delta,
            defer: false,
            active: None,
        }
    }

    /// Only grow agents on `sites`.
    pub fn with_active_sites(mut self, sites: CellIndex) -> Self {
        self.active = Some(sites);
        self
    }

    /// Leave re-indexing to a later `apply`.
    pub fn deferred(mut self) -> Self {
        self.defer = true;
        self
    }
}

impl<A: Agent> Process<A> for UniformBiomassGrowth {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "uniform-biomass-growth"
    }

    fn kind(&self) -> ProcessKind {
        ProcessKind::EveryStep
    }

    fn fire(&mut self, ctx: &mut StepContext<'_, A>) -> Result<(), HaltCondition> {
        let layer = ctx.layer_mut();
        let sites = occupied_in(layer, self.active.as_ref());
        feed(layer, &sites, self.delta, self.defer)
    }
}

/// Adds `delta` health each step, only to agents in the `target` state.
#[derive(Clone, Debug)]
pub struct TargetedBiomassGrowth {
    id: ProcessId,
    delta: f64,
    target: StateId,
    defer: bool,
    active: Option<CellIndex>,
}

impl TargetedBiomassGrowth {
    /// Grow agents in state `target`.
    pub fn new(id: ProcessId, delta: f64, target: StateId) -> Self {
        Self {
            id,
            delta,
            target,
            defer: false,
            active: None,
        }
    }

    /// Only grow agents on `sites`.
    pub fn with_active_sites(mut self, sites: CellIndex) -> Self {
        self.active = Some(sites);
        self
    }

    /// Leave re-indexing to a later `apply`.
    pub fn deferred(mut self) -> Self {
        self.defer = true;
        self
    }
}

impl<A: Agent> Process<A> for TargetedBiomassGrowth {
    fn id(&self) -> ProcessId {
        self.id
    }

    fn name(&self) -> &str {
        "targeted-biomass-growth"
    }

    fn kind(&self) -> ProcessKind {
        ProcessKind::EveryStep
    }

    fn fire(&mut self, ctx: &mut StepContext<'_, A>) -> Result<(), HaltCondition> {
        let layer = ctx.layer_mut();
        if layer.state_count(self.target) == 0 {
            return Ok(());
        }
        let sites: Vec<Coordinate> = occupied_in(layer, self.active.as_ref())
            .into_iter()
            .filter(|c| layer.state_at(c) == Some(self.target))
            .collect();
        feed(layer, &sites, self.delta, self.defer)
    }
}
