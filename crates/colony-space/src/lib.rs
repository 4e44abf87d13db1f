//! Lattice geometry for Colony simulations.
//!
//! A [`Geometry`] composes three independent pieces:
//!
//! - [`Lattice`]: connectivity and displacement arithmetic on the
//!   unbounded integer plane (rectangular, triangular) or line (linear).
//! - [`Shape`]: a finite region with a stable canonical site order
//!   (rectangle, hexagon, line).
//! - [`Boundary`]: what happens to positions outside the shape
//!   (periodic wrap, absorbing sentinel, or arena cut-off).
//!
//! Neighbourhood queries take a [`BoundaryMode`] selecting whether the
//! boundary is applied, out-of-bounds positions are excluded, or raw
//! lattice positions are returned.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod shape;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::{Boundary, BoundaryKind};
pub use config::GeometryConfig;
pub use error::SpaceError;
pub use geometry::{BoundaryMode, Geometry, Neighbors};
pub use lattice::Lattice;
pub use shape::{Shape, ShapeKind, MAX_EXTENT};
