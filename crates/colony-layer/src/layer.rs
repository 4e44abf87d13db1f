//! [`CellLayer`]: agents resident on a geometry, plus the update
//! operations that move them around.
//!
//! Every update is expressed as one or more [`OccupancyIndex::refresh`]
//! calls. Preconditions (site canonical, source occupied, target vacant,
//! agent divisible) are checked up front so a failed update leaves the
//! layer unchanged.

use crate::agent::Agent;
use crate::error::LayerError;
use crate::index::{OccupancyIndex, Occupant};
use colony_core::{AgentId, Coordinate, StateId};
use colony_space::{BoundaryMode, Geometry};
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One canonical site and what is indexed there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteState {
    /// Row index of the site.
    pub index: usize,
    /// The site.
    pub coord: Coordinate,
    /// The recorded occupant, if any.
    pub occupant: Option<Occupant>,
}

/// Agents of type `A` living on the sites of a shared [`Geometry`].
pub struct CellLayer<A: Agent> {
    geometry: Arc<Geometry>,
    agents: IndexMap<AgentId, A>,
    index: OccupancyIndex,
    next_agent: u64,
}

impl<A: Agent> CellLayer<A> {
    /// An empty layer over `geometry`.
    pub fn new(geometry: Arc<Geometry>) -> Self {
        Self {
            geometry,
            agents: IndexMap::new(),
            index: OccupancyIndex::new(),
            next_agent: 0,
        }
    }

    /// The layer's geometry.
    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    /// Read-only view of the occupancy index.
    pub fn index(&self) -> &OccupancyIndex {
        &self.index
    }

    fn site(&self, coord: &Coordinate) -> Result<Coordinate, LayerError> {
        if coord.is_end_of_world() {
            return Err(LayerError::Unoccupiable { coord: *coord });
        }
        if !self.geometry.is_in_bounds(coord) {
            return Err(LayerError::NotCanonical { coord: *coord });
        }
        Ok(coord.canonical())
    }

    fn resident(&self, site: &Coordinate) -> Result<AgentId, LayerError> {
        self.index
            .agent_at(site)
            .ok_or(LayerError::Vacant { coord: *site })
    }

    fn require_vacant(&self, site: &Coordinate) -> Result<(), LayerError> {
        if self.index.is_occupied(site) {
            Err(LayerError::Occupied { coord: *site })
        } else {
            Ok(())
        }
    }

    fn allocate(&mut self) -> AgentId {
        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        id
    }

    fn snapshot(id: AgentId, agent: &A) -> Occupant {
        Occupant {
            agent: id,
            state: agent.state(),
            divisible: agent.is_divisible(),
        }
    }

    // ── Update operations ───────────────────────────────────────

    /// Put `agent` on the vacant site `coord`.
    pub fn place(&mut self, agent: A, coord: &Coordinate) -> Result<AgentId, LayerError> {
        let site = self.site(coord)?;
        self.require_vacant(&site)?;
        let id = self.allocate();
        self.index
            .refresh(&site, None, Some(Self::snapshot(id, &agent)))?;
        self.agents.insert(id, agent);
        log::trace!("placed agent {id} at {site}");
        Ok(id)
    }

    /// Remove and return the agent at `coord`.
    pub fn banish(&mut self, coord: &Coordinate) -> Result<A, LayerError> {
        let site = self.site(coord)?;
        let id = self.resident(&site)?;
        self.index.refresh(&site, Some(id), None)?;
        log::trace!("banished agent {id} from {site}");
        self.agents
            .swap_remove(&id)
            .ok_or(LayerError::Vacant { coord: site })
    }

    /// Swap the agent at `coord` for `agent`, returning the previous one.
    pub fn replace(&mut self, coord: &Coordinate, agent: A) -> Result<A, LayerError> {
        let site = self.site(coord)?;
        let old = self.resident(&site)?;
        let id = self.allocate();
        self.index
            .refresh(&site, Some(old), Some(Self::snapshot(id, &agent)))?;
        self.agents.insert(id, agent);
        self.agents
            .swap_remove(&old)
            .ok_or(LayerError::Vacant { coord: site })
    }

    /// Move the agent at `from` to the vacant site `to`.
    pub fn move_agent(&mut self, from: &Coordinate, to: &Coordinate) -> Result<(), LayerError> {
        let from = self.site(from)?;
        let to = self.site(to)?;
        if from == to {
            return Ok(());
        }
        let id = self.resident(&from)?;
        self.require_vacant(&to)?;
        let occupant = *self
            .index
            .occupant(&from)
            .ok_or(LayerError::Vacant { coord: from })?;
        self.index.refresh(&from, Some(id), None)?;
        self.index.refresh(&to, None, Some(occupant))?;
        Ok(())
    }

    /// Exchange the contents of two sites. Either may be vacant.
    pub fn swap(&mut self, p: &Coordinate, q: &Coordinate) -> Result<(), LayerError> {
        let p = self.site(p)?;
        let q = self.site(q)?;
        if p == q {
            return Ok(());
        }
        let at_p = self.index.occupant(&p).copied();
        let at_q = self.index.occupant(&q).copied();
        self.index.refresh(&p, at_p.map(|o| o.agent), None)?;
        self.index.refresh(&q, at_q.map(|o| o.agent), None)?;
        if let Some(o) = at_p {
            self.index.refresh(&q, None, Some(o))?;
        }
        if let Some(o) = at_q {
            self.index.refresh(&p, None, Some(o))?;
        }
        Ok(())
    }

    /// Divide the agent at `from`, placing the daughter on the vacant
    /// site `to`. Returns the daughter's id.
    pub fn divide(&mut self, from: &Coordinate, to: &Coordinate) -> Result<AgentId, LayerError> {
        let from = self.site(from)?;
        let to = self.site(to)?;
        let parent_id = self.resident(&from)?;
        self.require_vacant(&to)?;
        let parent = self
            .agents
            .get_mut(&parent_id)
            .ok_or(LayerError::Vacant { coord: from })?;
        if !parent.is_divisible() {
            return Err(LayerError::NotDivisible { coord: from });
        }
        let daughter = parent.divide();
        let parent_snapshot = Self::snapshot(parent_id, parent);
        self.index
            .refresh(&from, Some(parent_id), Some(parent_snapshot))?;
        let daughter_id = self.allocate();
        self.index
            .refresh(&to, None, Some(Self::snapshot(daughter_id, &daughter)))?;
        self.agents.insert(daughter_id, daughter);
        log::trace!("agent {parent_id} at {from} divided into {daughter_id} at {to}");
        Ok(daughter_id)
    }

    /// Push every agent on `path` one step toward its last site.
    ///
    /// `path` must be a chain of adjacent sites (boundary applied) with
    /// no repeats, occupied everywhere except the last site, which must
    /// be vacant. Afterwards `path[0]` is vacant. The whole chain is
    /// checked before anything moves.
    pub fn shove(&mut self, path: &[Coordinate]) -> Result<(), LayerError> {
        let sites = path
            .iter()
            .map(|c| self.site(c))
            .collect::<Result<Vec<_>, _>>()?;
        let Some((last, rest)) = sites.split_last() else {
            return Ok(());
        };
        self.require_vacant(last)?;
        let mut seen = IndexSet::with_capacity(sites.len());
        for site in &sites {
            if !seen.insert(*site) {
                return Err(LayerError::InvalidPath {
                    coord: *site,
                    reason: "site repeats",
                });
            }
        }
        for site in rest {
            self.resident(site)?;
        }
        for pair in sites.windows(2) {
            let adjacent = self
                .geometry
                .neighbors(&pair[0], BoundaryMode::Apply)?
                .iter()
                .any(|n| *n == pair[1]);
            if !adjacent {
                return Err(LayerError::InvalidPath {
                    coord: pair[1],
                    reason: "not adjacent to the previous site",
                });
            }
        }
        for pair in sites.windows(2).rev() {
            self.move_agent(&pair[0], &pair[1])?;
        }
        log::trace!("shoved {} agents from {} toward {last}", rest.len(), sites[0]);
        Ok(())
    }

    /// Re-index the agent at `coord` after its state or divisibility
    /// changed.
    pub fn apply(&mut self, coord: &Coordinate) -> Result<(), LayerError> {
        let site = self.site(coord)?;
        let id = self.resident(&site)?;
        let agent = self
            .agents
            .get(&id)
            .ok_or(LayerError::Vacant { coord: site })?;
        let snapshot = Self::snapshot(id, agent);
        self.index.refresh(&site, Some(id), Some(snapshot))?;
        Ok(())
    }

    /// Mutate the agent at `coord` in place and re-index it.
    pub fn update<F>(&mut self, coord: &Coordinate, f: F) -> Result<(), LayerError>
    where
        F: FnOnce(&mut A),
    {
        let site = self.site(coord)?;
        let id = self.resident(&site)?;
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(LayerError::Vacant { coord: site })?;
        f(agent);
        self.apply(&site)
    }

    /// Mutable access to the agent at `coord` without re-indexing.
    ///
    /// The index keeps the old state and divisibility until
    /// [`apply`](Self::apply) is called for the site.
    pub fn agent_mut(&mut self, coord: &Coordinate) -> Option<&mut A> {
        let id = self.index.agent_at(&coord.canonical())?;
        self.agents.get_mut(&id)
    }

    /// Remove every agent.
    pub fn clear(&mut self) {
        self.agents.clear();
        self.index.clear();
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The agent at `coord`.
    pub fn agent(&self, coord: &Coordinate) -> Option<&A> {
        self.index.agent_at(coord).and_then(|id| self.agents.get(&id))
    }

    /// The agent with id `id`.
    pub fn agent_by_id(&self, id: AgentId) -> Option<&A> {
        self.agents.get(&id)
    }

    /// Id of the agent at `coord`.
    pub fn agent_id_at(&self, coord: &Coordinate) -> Option<AgentId> {
        self.index.agent_at(coord)
    }

    /// True if an agent sits at `coord`. Always false for the sentinel.
    pub fn is_occupied(&self, coord: &Coordinate) -> bool {
        self.index.is_occupied(coord)
    }

    /// True if a divisible agent sits at `coord`.
    pub fn is_divisible(&self, coord: &Coordinate) -> bool {
        self.index.is_divisible(coord)
    }

    /// Indexed state at `coord`.
    pub fn state_at(&self, coord: &Coordinate) -> Option<StateId> {
        self.index.occupant(coord).map(|o| o.state)
    }

    /// Health at `coord`; zero for vacant sites.
    pub fn health_at(&self, coord: &Coordinate) -> f64 {
        self.agent(coord).map_or(0.0, Agent::health)
    }

    /// Number of agents.
    pub fn occupied_count(&self) -> usize {
        self.index.occupied_count()
    }

    /// Number of divisible agents.
    pub fn divisible_count(&self) -> usize {
        self.index.divisible_count()
    }

    /// Number of agents in `state`.
    pub fn state_count(&self, state: StateId) -> usize {
        self.index.state_count(state)
    }

    /// Agent counts per state, ascending by state.
    pub fn state_map(&self) -> &BTreeMap<StateId, usize> {
        self.index.state_map()
    }

    /// Occupied sites in canonical order.
    pub fn occupied_sites(&self) -> Vec<Coordinate> {
        self.in_canonical_order(self.index.occupied_sites().copied().collect())
    }

    /// Divisible sites in canonical order.
    pub fn divisible_sites(&self) -> Vec<Coordinate> {
        self.in_canonical_order(self.index.divisible_sites().iter().copied().collect())
    }

    fn in_canonical_order(&self, mut sites: Vec<Coordinate>) -> Vec<Coordinate> {
        sites.sort_by_cached_key(|c| self.geometry.coord_to_index(c).unwrap_or(usize::MAX));
        sites
    }

    /// Vacant sites adjacent to `coord`, boundary applied, in lattice
    /// rotational order. The absorbing sentinel is never vacant.
    pub fn vacant_neighbors(&self, coord: &Coordinate) -> Result<Vec<Coordinate>, LayerError> {
        let neighbors = self.geometry.neighbors(coord, BoundaryMode::Apply)?;
        let vacant: IndexSet<Coordinate> = neighbors
            .into_iter()
            .filter(|n| !n.is_end_of_world() && !self.index.is_occupied(n))
            .map(Coordinate::canonical)
            .collect();
        Ok(vacant.into_iter().collect())
    }

    /// Shortest paths from `origin` to each of its nearest vacancies.
    ///
    /// Paths run over occupied sites (boundary applied) and end on the
    /// vacancy, so each one is a valid argument to [`shove`](Self::shove).
    /// A vacant `origin` yields `[[origin]]`; a layer with no reachable
    /// vacancy yields no paths. Ties come back in breadth-first discovery
    /// order.
    pub fn nearest_vacancy_paths(
        &self,
        origin: &Coordinate,
    ) -> Result<Vec<Vec<Coordinate>>, LayerError> {
        let origin = self.site(origin)?;
        if !self.index.is_occupied(&origin) {
            return Ok(vec![vec![origin]]);
        }
        // Site -> the site it was first reached from.
        let mut reached: IndexMap<Coordinate, Coordinate> = IndexMap::new();
        reached.insert(origin, origin);
        let mut frontier = vec![origin];
        while !frontier.is_empty() {
            let mut next = Vec::new();
            let mut vacancies = Vec::new();
            for site in &frontier {
                for n in self.geometry.neighbors(site, BoundaryMode::Apply)? {
                    if n.is_end_of_world() {
                        continue;
                    }
                    let n = n.canonical();
                    if reached.contains_key(&n) {
                        continue;
                    }
                    reached.insert(n, *site);
                    if self.index.is_occupied(&n) {
                        next.push(n);
                    } else {
                        vacancies.push(n);
                    }
                }
            }
            if !vacancies.is_empty() {
                return Ok(vacancies
                    .into_iter()
                    .map(|v| trace_back(&reached, v))
                    .collect());
            }
            frontier = next;
        }
        Ok(Vec::new())
    }

    /// Every canonical site with its recorded occupant, in index order.
    pub fn site_states(&self) -> Vec<SiteState> {
        self.geometry
            .shape()
            .iter()
            .enumerate()
            .map(|(index, coord)| SiteState {
                index,
                coord: *coord,
                occupant: self.index.occupant(coord).copied(),
            })
            .collect()
    }
}

/// Walk `reached` back from `end` to the breadth-first root.
fn trace_back(reached: &IndexMap<Coordinate, Coordinate>, end: Coordinate) -> Vec<Coordinate> {
    let mut path = vec![end];
    let mut at = end;
    while let Some(&from) = reached.get(&at) {
        if from == at {
            break;
        }
        path.push(from);
        at = from;
    }
    path.reverse();
    path
}
