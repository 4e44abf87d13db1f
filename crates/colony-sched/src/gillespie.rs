//! Gillespie-style event selection over registered processes.

use crate::error::SchedError;
use crate::range_map::RangeMap;
use colony_core::ProcessId;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    count: usize,
    weight: f64,
}

/// Per-event registry of candidate processes.
///
/// Each stochastic process registers once per event with the number of
/// candidate targets it has and its total propensity. Iteration is in
/// ascending [`ProcessId`] order.
#[derive(Clone, Debug, Default)]
pub struct GillespieState {
    entries: BTreeMap<ProcessId, Entry>,
}

impl GillespieState {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` with `count` candidates and total `weight`.
    pub fn add(&mut self, id: ProcessId, count: usize, weight: f64) -> Result<(), SchedError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SchedError::InvalidWeight {
                key: format!("process {id}"),
                weight,
            });
        }
        if self.entries.contains_key(&id) {
            return Err(SchedError::DuplicateKey {
                key: format!("process {id}"),
            });
        }
        self.entries.insert(id, Entry { count, weight });
        Ok(())
    }

    /// Registered weight of `id`.
    pub fn weight(&self, id: ProcessId) -> Option<f64> {
        self.entries.get(&id).map(|e| e.weight)
    }

    /// Registered candidate count of `id`.
    pub fn count(&self, id: ProcessId) -> Option<usize> {
        self.entries.get(&id).map(|e| e.count)
    }

    /// Sum of registered weights.
    pub fn total_weight(&self) -> f64 {
        self.entries.values().map(|e| e.weight).sum()
    }

    /// Sum of registered candidate counts.
    pub fn total_count(&self) -> usize {
        self.entries.values().map(|e| e.count).sum()
    }

    /// Registered ids in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Picks the process that fires next, proportionally to weight.
#[derive(Clone, Debug)]
pub struct GillespieChooser {
    map: RangeMap<ProcessId>,
}

impl GillespieChooser {
    /// Lay out the registered processes in ascending id order.
    pub fn new(state: &GillespieState) -> Result<Self, SchedError> {
        let mut map = RangeMap::new();
        for (id, entry) in &state.entries {
            map.add(*id, entry.weight)?;
        }
        Ok(Self { map })
    }

    /// Total weight across all processes.
    pub fn total_weight(&self) -> f64 {
        self.map.total_weight()
    }

    /// The process owning `x`, which must lie in `[0, total_weight())`.
    pub fn select_target(&self, x: f64) -> Result<ProcessId, SchedError> {
        self.map.select_target(x).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u32) -> ProcessId {
        ProcessId(id)
    }

    fn fixture() -> GillespieState {
        let mut gs = GillespieState::new();
        // Registered out of order; selection must follow ascending ids.
        gs.add(p(5), 5, 0.5).unwrap();
        gs.add(p(1), 3, 0.3).unwrap();
        gs.add(p(2), 2, 0.2).unwrap();
        gs
    }

    #[test]
    fn chooser_follows_ascending_ids() {
        let chooser = GillespieChooser::new(&fixture()).unwrap();
        let cases = [(0.0, 1), (0.29, 1), (0.30, 2), (0.49, 2), (0.50, 5), (0.99, 5)];
        for (x, expected) in cases {
            assert_eq!(chooser.select_target(x).unwrap(), p(expected), "x = {x}");
        }
    }

    #[test]
    fn totals() {
        let gs = fixture();
        assert!((gs.total_weight() - 1.0).abs() < 1e-12);
        assert_eq!(gs.total_count(), 10);
        assert_eq!(gs.keys().collect::<Vec<_>>(), vec![p(1), p(2), p(5)]);
        assert_eq!(gs.weight(p(2)), Some(0.2));
        assert_eq!(gs.count(p(3)), None);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut gs = fixture();
        assert!(matches!(
            gs.add(p(1), 1, 1.0),
            Err(SchedError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn negative_weight_rejected() {
        let mut gs = GillespieState::new();
        assert!(matches!(
            gs.add(p(1), 1, -1.0),
            Err(SchedError::InvalidWeight { .. })
        ));
        assert!(gs.is_empty());
    }

    #[test]
    fn empty_chooser_fails_fast() {
        let chooser = GillespieChooser::new(&GillespieState::new()).unwrap();
        assert_eq!(chooser.select_target(0.0), Err(SchedError::EmptySelection));
    }
}
