//! Occupancy bookkeeping with a single mutation entry point.
//!
//! [`OccupancyIndex`] keeps four views of the same facts consistent:
//! which agent sits at each site, where each agent sits, which sites hold
//! divisible agents, and how many agents are in each state. Every change
//! goes through [`OccupancyIndex::refresh`], which validates all of its
//! preconditions before touching any structure.

use crate::cell_index::CellIndex;
use crate::error::LayerError;
use colony_core::{AgentId, Coordinate, StateId};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// What the index records about the agent at a site.
///
/// Captured when the agent is placed or re-indexed; the recorded state is
/// what gets decremented on removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    /// The resident agent.
    pub agent: AgentId,
    /// Its state when last indexed.
    pub state: StateId,
    /// Its divisibility when last indexed.
    pub divisible: bool,
}

/// Change in overall occupancy caused by one refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The occupied count did not cross zero.
    Steady,
    /// The last agent was removed.
    Extinct,
    /// An agent was added to an empty index.
    Repopulated,
}

/// Site, agent, divisibility, and state-count indices kept in lockstep.
#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    occupants: IndexMap<Coordinate, Occupant>,
    locations: IndexMap<AgentId, Coordinate>,
    divisible: CellIndex,
    states: BTreeMap<StateId, usize>,
}

impl OccupancyIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is indexed at `coord` (`old`) with `new`.
    ///
    /// | old     | new     | effect                                  |
    /// |---------|---------|-----------------------------------------|
    /// | `None`  | `None`  | no-op                                   |
    /// | `Some`  | `None`  | site vacated                            |
    /// | `None`  | `Some`  | site occupied                           |
    /// | `Some`  | `Some`  | occupant replaced (or re-indexed)       |
    ///
    /// Fails without mutating anything if `old` is not the agent currently
    /// indexed at `coord`, if `new` names an agent indexed at a different
    /// site, or if `coord` is the absorbing sentinel and `new` is present.
    pub fn refresh(
        &mut self,
        coord: &Coordinate,
        old: Option<AgentId>,
        new: Option<Occupant>,
    ) -> Result<Transition, LayerError> {
        if new.is_some() && coord.is_end_of_world() {
            return Err(LayerError::Unoccupiable { coord: *coord });
        }
        let found = self.agent_at(coord);
        if found != old {
            return Err(LayerError::StaleOccupant {
                coord: *coord,
                expected: old,
                found,
            });
        }
        if let Some(occupant) = &new {
            if let Some(at) = self.locations.get(&occupant.agent) {
                if at != coord {
                    return Err(LayerError::AgentAlreadyIndexed {
                        agent: occupant.agent,
                        at: *at,
                    });
                }
            }
        }

        let before = self.occupants.len();
        if let Some(previous) = self.occupants.swap_remove(coord) {
            self.locations.swap_remove(&previous.agent);
            self.divisible.remove(coord);
            self.decrement(previous.state);
        }
        if let Some(occupant) = new {
            let site = coord.canonical();
            self.occupants.insert(site, occupant);
            self.locations.insert(occupant.agent, site);
            if occupant.divisible {
                self.divisible.add(&site);
            }
            *self.states.entry(occupant.state).or_insert(0) += 1;
        }
        let after = self.occupants.len();

        Ok(match (before, after) {
            (b, 0) if b > 0 => Transition::Extinct,
            (0, a) if a > 0 => Transition::Repopulated,
            _ => Transition::Steady,
        })
    }

    fn decrement(&mut self, state: StateId) {
        if let Some(count) = self.states.get_mut(&state) {
            *count -= 1;
            if *count == 0 {
                self.states.remove(&state);
            }
        }
    }

    /// Drop every entry from every structure.
    pub fn clear(&mut self) {
        self.occupants.clear();
        self.locations.clear();
        self.divisible.clear();
        self.states.clear();
    }

    /// True if an agent is indexed at `coord`.
    pub fn is_occupied(&self, coord: &Coordinate) -> bool {
        self.occupants.contains_key(coord)
    }

    /// True if a divisible agent is indexed at `coord`.
    pub fn is_divisible(&self, coord: &Coordinate) -> bool {
        self.divisible.contains(coord)
    }

    /// True if `agent` is indexed anywhere.
    pub fn is_indexed(&self, agent: AgentId) -> bool {
        self.locations.contains_key(&agent)
    }

    /// Where `agent` is indexed.
    pub fn locate(&self, agent: AgentId) -> Option<Coordinate> {
        self.locations.get(&agent).copied()
    }

    /// The recorded occupant of `coord`.
    pub fn occupant(&self, coord: &Coordinate) -> Option<&Occupant> {
        self.occupants.get(coord)
    }

    /// The agent indexed at `coord`.
    pub fn agent_at(&self, coord: &Coordinate) -> Option<AgentId> {
        self.occupants.get(coord).map(|o| o.agent)
    }

    /// Number of agents in `state`; zero for states never seen.
    pub fn state_count(&self, state: StateId) -> usize {
        self.states.get(&state).copied().unwrap_or(0)
    }

    /// Non-zero state counts in ascending state order.
    pub fn state_map(&self) -> &BTreeMap<StateId, usize> {
        &self.states
    }

    /// Number of occupied sites.
    pub fn occupied_count(&self) -> usize {
        self.occupants.len()
    }

    /// Number of sites holding a divisible agent.
    pub fn divisible_count(&self) -> usize {
        self.divisible.len()
    }

    /// Occupied sites, in no particular order.
    pub fn occupied_sites(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.occupants.keys()
    }

    /// Sites holding a divisible agent.
    pub fn divisible_sites(&self) -> &CellIndex {
        &self.divisible
    }
}
