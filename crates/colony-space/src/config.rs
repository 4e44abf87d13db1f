//! Plain-data geometry configuration.
//!
//! [`GeometryConfig`] gathers the three construction parameters (lattice,
//! shape, boundary) so callers that load settings from elsewhere can
//! validate them in one place before building a [`Geometry`].

use crate::boundary::BoundaryKind;
use crate::error::SpaceError;
use crate::geometry::Geometry;
use crate::lattice::Lattice;
use crate::shape::{Shape, ShapeKind};

/// Construction parameters for a [`Geometry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometryConfig {
    /// Lattice connectivity.
    pub lattice: Lattice,
    /// Shape kind and size.
    pub shape: ShapeKind,
    /// Boundary policy.
    pub boundary: BoundaryKind,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            lattice: Lattice::Rectangular,
            shape: ShapeKind::Rectangle {
                width: 32,
                height: 32,
            },
            boundary: BoundaryKind::Arena,
        }
    }
}

impl GeometryConfig {
    /// Check that the parameters describe a buildable geometry.
    pub fn validate(&self) -> Result<(), SpaceError> {
        self.build().map(drop)
    }

    /// Build the geometry.
    pub fn build(&self) -> Result<Geometry, SpaceError> {
        let shape = Shape::new(self.lattice, self.shape)?;
        Geometry::new(self.lattice, shape, self.boundary)
    }
}
