//! Error types for geometry construction and coordinate queries.

use crate::boundary::BoundaryKind;
use crate::lattice::Lattice;
use colony_core::{Coordinate, Flags};
use std::fmt;

/// Errors arising from geometry construction or coordinate queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// A coordinate lacks a flag the operation requires
    /// (for example a displacement passed where a position is expected).
    FlagMismatch {
        /// The offending coordinate.
        coord: Coordinate,
        /// The flags the operation requires.
        expected: Flags,
        /// The operation that rejected it.
        operation: &'static str,
    },
    /// A coordinate is not one of the shape's canonical sites.
    NotCanonical {
        /// The offending coordinate.
        coord: Coordinate,
    },
    /// The shape cannot be laid out on the given lattice.
    IncompatibleLattice {
        /// Shape kind name.
        shape: &'static str,
        /// The rejected lattice.
        lattice: Lattice,
    },
    /// A shape extent is zero, or a dimension exceeds
    /// [`MAX_EXTENT`](crate::shape::MAX_EXTENT).
    InvalidDimension {
        /// Which dimension.
        name: &'static str,
        /// The rejected value.
        value: u64,
    },
    /// A ring radius would push coordinates past the `i32` range.
    RadiusOutOfRange {
        /// Ring centre.
        center: Coordinate,
        /// The rejected radius.
        radius: u32,
    },
    /// A rescale factor is non-finite or not positive.
    InvalidScale {
        /// The rejected factor.
        factor: f64,
    },
    /// The boundary policy cannot be applied to this shape.
    UnsupportedBoundary {
        /// The rejected policy.
        boundary: BoundaryKind,
        /// What made it unsupported.
        reason: String,
    },
    /// Site enumeration produced the same coordinate twice.
    DuplicateSite {
        /// The repeated coordinate.
        coord: Coordinate,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlagMismatch {
                coord,
                expected,
                operation,
            } => write!(f, "{operation}: coordinate {coord} must carry {expected}"),
            Self::NotCanonical { coord } => {
                write!(f, "attempted to index non-canonical coordinate {coord}")
            }
            Self::IncompatibleLattice { shape, lattice } => {
                write!(f, "{shape} cannot be laid out on a {lattice:?} lattice")
            }
            Self::InvalidDimension { name, value } => write!(
                f,
                "{name} = {value} is out of range (max {})",
                crate::shape::MAX_EXTENT
            ),
            Self::RadiusOutOfRange { center, radius } => {
                write!(f, "annulus of radius {radius} around {center} leaves the coordinate range")
            }
            Self::InvalidScale { factor } => {
                write!(f, "scale factor must be finite and positive, got {factor}")
            }
            Self::UnsupportedBoundary { boundary, reason } => {
                write!(f, "{boundary:?} boundary unsupported: {reason}")
            }
            Self::DuplicateSite { coord } => {
                write!(f, "site enumeration produced {coord} twice")
            }
        }
    }
}

impl std::error::Error for SpaceError {}

/// Fails with [`SpaceError::FlagMismatch`] unless `coord` carries `flags`.
pub(crate) fn require(
    coord: &Coordinate,
    flags: Flags,
    operation: &'static str,
) -> Result<(), SpaceError> {
    if coord.has_flag(flags) {
        Ok(())
    } else {
        Err(SpaceError::FlagMismatch {
            coord: *coord,
            expected: flags,
            operation,
        })
    }
}
