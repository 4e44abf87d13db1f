//! Core types for the Colony lattice simulation core.
//!
//! This is the leaf crate with zero internal Colony dependencies. It
//! defines the [`Coordinate`] value shared by every other crate, its
//! [`Flags`], and the strongly-typed identifiers used by the cell layer
//! and the scheduler.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod id;

pub use coord::{Coordinate, Flags};
pub use id::{AgentId, ProcessId, StateId};
