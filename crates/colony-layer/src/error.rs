//! Error types for occupancy bookkeeping and layer updates.

use colony_core::{AgentId, Coordinate};
use colony_space::SpaceError;
use std::error::Error;
use std::fmt;

/// Errors arising from cell layer updates.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerError {
    /// A geometry query failed.
    Space(SpaceError),
    /// The caller's view of a site disagrees with the index.
    StaleOccupant {
        /// The site being refreshed.
        coord: Coordinate,
        /// The agent the caller believed was there.
        expected: Option<AgentId>,
        /// The agent actually indexed there.
        found: Option<AgentId>,
    },
    /// An agent is already indexed at another site.
    AgentAlreadyIndexed {
        /// The agent.
        agent: AgentId,
        /// Where it is currently indexed.
        at: Coordinate,
    },
    /// The target site already holds an agent.
    Occupied {
        /// The site.
        coord: Coordinate,
    },
    /// The site holds no agent.
    Vacant {
        /// The site.
        coord: Coordinate,
    },
    /// The agent at the site cannot divide.
    NotDivisible {
        /// The site.
        coord: Coordinate,
    },
    /// The site is not a canonical site of the layer's geometry.
    NotCanonical {
        /// The site.
        coord: Coordinate,
    },
    /// A shove path is not a chain of adjacent sites ending in a vacancy.
    InvalidPath {
        /// The first site where the chain breaks.
        coord: Coordinate,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// Agents cannot be placed on the absorbing sentinel.
    Unoccupiable {
        /// The site.
        coord: Coordinate,
    },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "geometry: {e}"),
            Self::StaleOccupant {
                coord,
                expected,
                found,
            } => write!(
                f,
                "stale refresh at {coord}: expected {}, found {}",
                describe(expected),
                describe(found)
            ),
            Self::AgentAlreadyIndexed { agent, at } => {
                write!(f, "agent {agent} is already indexed at {at}")
            }
            Self::Occupied { coord } => write!(f, "site {coord} is occupied"),
            Self::Vacant { coord } => write!(f, "site {coord} is vacant"),
            Self::NotDivisible { coord } => {
                write!(f, "agent at {coord} is not divisible")
            }
            Self::NotCanonical { coord } => {
                write!(f, "site {coord} is not part of the layer")
            }
            Self::InvalidPath { coord, reason } => {
                write!(f, "invalid shove path at {coord}: {reason}")
            }
            Self::Unoccupiable { coord } => {
                write!(f, "site {coord} cannot hold an agent")
            }
        }
    }
}

fn describe(agent: &Option<AgentId>) -> String {
    match agent {
        Some(id) => format!("agent {id}"),
        None => "vacancy".into(),
    }
}

impl Error for LayerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for LayerError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}
