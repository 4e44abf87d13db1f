//! Strongly-typed identifiers.

use std::fmt;

/// Identifies an agent resident on a cell layer.
///
/// Allocated sequentially by the owning layer and never reused within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a process registered with a scheduler.
///
/// Weighted selection walks processes in ascending id order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Discrete agent state (cell type).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StateId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_raw_value() {
        assert_eq!(AgentId(7).to_string(), "7");
        assert_eq!(ProcessId::from(3).to_string(), "3");
        assert_eq!(StateId::from(2), StateId(2));
    }

    #[test]
    fn process_ids_order_numerically() {
        let mut ids = vec![ProcessId(5), ProcessId(1), ProcessId(2)];
        ids.sort();
        assert_eq!(ids, vec![ProcessId(1), ProcessId(2), ProcessId(5)]);
    }
}
