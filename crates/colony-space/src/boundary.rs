//! Boundary conditions: what happens to positions outside a shape.

use crate::error::{require, SpaceError};
use crate::shape::{Shape, ShapeKind};
use crate::Lattice;
use colony_core::{Coordinate, Flags};
use std::sync::Arc;

/// The closed set of boundary policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Opposite edges are identified (torus or ring).
    Periodic,
    /// Out-of-bounds positions collapse to the end-of-world sentinel.
    Absorbing,
    /// Out-of-bounds positions do not exist.
    #[default]
    Arena,
}

/// A boundary policy bound to the shape it constrains.
#[derive(Clone, Debug)]
pub struct Boundary {
    kind: BoundaryKind,
    shape: Arc<Shape>,
}

impl Boundary {
    /// Bind `kind` to `shape`.
    ///
    /// Periodic wrap requires a shape that tiles the plane by translation
    /// in the offset frame; hexagons and odd-width rectangles on a
    /// triangular lattice are rejected.
    pub fn new(kind: BoundaryKind, shape: Arc<Shape>) -> Result<Self, SpaceError> {
        if kind == BoundaryKind::Periodic {
            match shape.kind() {
                ShapeKind::Hexagon { .. } => {
                    return Err(SpaceError::UnsupportedBoundary {
                        boundary: kind,
                        reason: "hexagons do not tile by translation".into(),
                    });
                }
                ShapeKind::Rectangle { width, .. }
                    if shape.lattice() == Lattice::Triangular && width % 2 == 1 =>
                {
                    return Err(SpaceError::UnsupportedBoundary {
                        boundary: kind,
                        reason: format!(
                            "triangular rectangle width {width} must be even to wrap"
                        ),
                    });
                }
                _ => {}
            }
        }
        Ok(Self { kind, shape })
    }

    /// The policy.
    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    /// The constrained shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// True if `coord` is a canonical site of the shape.
    pub fn is_in_bounds(&self, coord: &Coordinate) -> bool {
        !coord.is_end_of_world() && self.shape.contains(coord)
    }

    /// Map a position through the boundary.
    ///
    /// In-bounds positions come back unchanged. Out-of-bounds positions
    /// are wrapped to a canonical site (periodic), replaced by
    /// [`Coordinate::end_of_world`] (absorbing), or dropped with `None`
    /// (arena). Remapped results carry [`Flags::BOUNDARY_APPLIED`].
    pub fn apply(&self, coord: &Coordinate) -> Result<Option<Coordinate>, SpaceError> {
        if coord.is_end_of_world() {
            return Ok(match self.kind {
                BoundaryKind::Absorbing => Some(Coordinate::end_of_world()),
                BoundaryKind::Periodic | BoundaryKind::Arena => None,
            });
        }
        require(coord, Flags::PLANAR, "apply_boundary")?;
        if self.shape.contains(coord) {
            return Ok(Some(coord.canonical()));
        }
        match self.kind {
            BoundaryKind::Periodic => self.wrap(coord).map(Some),
            BoundaryKind::Absorbing => Ok(Some(Coordinate::end_of_world())),
            BoundaryKind::Arena => Ok(None),
        }
    }

    /// Translate by whole shape periods along each offset axis until the
    /// position lands on a canonical site.
    fn wrap(&self, coord: &Coordinate) -> Result<Coordinate, SpaceError> {
        let (ex, ey) = self
            .shape
            .periodic_extent()
            .ok_or_else(|| SpaceError::UnsupportedBoundary {
                boundary: self.kind,
                reason: format!("{} does not tile by translation", self.shape.kind().name()),
            })?;
        let lattice = self.shape.lattice();
        let o = lattice.inv_adjust(coord)?;
        let wrapped = Coordinate::planar(o.x().rem_euclid(ex), o.y().rem_euclid(ey));
        let site = lattice.adjust(&wrapped)?;
        debug_assert!(self.shape.contains(&site), "wrap left the shape: {site}");
        Ok(site.with_flag(Flags::BOUNDARY_APPLIED))
    }
}
