//! Occupancy bookkeeping for Colony simulations.
//!
//! A [`CellLayer`] holds agents on the canonical sites of a shared
//! [`Geometry`](colony_space::Geometry). Its [`OccupancyIndex`] answers
//! the questions processes ask every event (is this site occupied, which
//! sites hold divisible agents, how many agents are in each state)
//! without scanning the lattice.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod cell_index;
pub mod error;
pub mod index;
pub mod layer;

pub use agent::Agent;
pub use cell_index::CellIndex;
pub use error::LayerError;
pub use index::{OccupancyIndex, Occupant, Transition};
pub use layer::{CellLayer, SiteState};
