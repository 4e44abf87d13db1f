//! The [`Geometry`] aggregate: one lattice, one shape, one boundary.
//!
//! Geometry is immutable after construction and shared by reference
//! (`Arc<Geometry>`) between the cell layer and every process that
//! queries neighbourhoods. All queries take `&self`.

use crate::boundary::{Boundary, BoundaryKind};
use crate::error::SpaceError;
use crate::lattice::Lattice;
use crate::shape::Shape;
use colony_core::Coordinate;
use smallvec::SmallVec;
use std::sync::Arc;

/// Neighbour list returned by [`Geometry::neighbors`]; never spills for
/// the supported lattices.
pub type Neighbors = SmallVec<[Coordinate; 8]>;

/// How a neighbourhood query treats positions outside the shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryMode {
    /// Map every position through the boundary; drop unmapped ones.
    #[default]
    Apply,
    /// Keep only positions that are canonical sites.
    Exclude,
    /// Return raw lattice positions, in or out of bounds.
    Ignore,
}

/// Lattice + shape + boundary.
#[derive(Clone, Debug)]
pub struct Geometry {
    lattice: Lattice,
    shape: Arc<Shape>,
    boundary: Boundary,
}

impl Geometry {
    /// Assemble a geometry. `shape` must be laid out on `lattice`.
    pub fn new(lattice: Lattice, shape: Shape, boundary: BoundaryKind) -> Result<Self, SpaceError> {
        if shape.lattice() != lattice {
            return Err(SpaceError::IncompatibleLattice {
                shape: shape.kind().name(),
                lattice,
            });
        }
        let shape = Arc::new(shape);
        let boundary = Boundary::new(boundary, Arc::clone(&shape)).inspect_err(|e| {
            log::debug!("rejected geometry: {e}");
        })?;
        log::debug!(
            "built {:?} {} geometry: {} sites, {:?} boundary",
            lattice,
            shape.kind().name(),
            shape.len(),
            boundary.kind()
        );
        Ok(Self {
            lattice,
            shape,
            boundary,
        })
    }

    /// The lattice.
    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// The shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The boundary.
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// The boundary policy.
    pub fn boundary_kind(&self) -> BoundaryKind {
        self.boundary.kind()
    }

    /// Spatial dimensions of the lattice.
    pub fn dimensionality(&self) -> usize {
        self.lattice.dimensionality()
    }

    /// Nearest-neighbour count of the lattice.
    pub fn connectivity(&self) -> usize {
        self.lattice.connectivity()
    }

    /// Number of canonical sites.
    pub fn site_count(&self) -> usize {
        self.shape.len()
    }

    /// Owned copy of the canonical sites in index order.
    pub fn canonical_sites(&self) -> Vec<Coordinate> {
        self.shape.canonical_sites()
    }

    /// Row index of a canonical site.
    pub fn coord_to_index(&self, coord: &Coordinate) -> Result<usize, SpaceError> {
        self.shape.coord_to_index(coord)
    }

    /// Centre site of the shape.
    pub fn center(&self) -> Coordinate {
        self.shape.center()
    }

    /// Edge sites of the shape.
    pub fn boundaries(&self) -> Vec<Coordinate> {
        self.shape.boundaries()
    }

    /// Shape size along each axis.
    pub fn dimensions(&self) -> Vec<u32> {
        self.shape.dimensions()
    }

    /// True if `coord` is a canonical site.
    pub fn is_in_bounds(&self, coord: &Coordinate) -> bool {
        self.boundary.is_in_bounds(coord)
    }

    /// Map a position through the boundary.
    pub fn apply_boundary(&self, coord: &Coordinate) -> Result<Option<Coordinate>, SpaceError> {
        self.boundary.apply(coord)
    }

    /// Lattice displacement from `p` to `q`.
    pub fn displacement(&self, p: &Coordinate, q: &Coordinate) -> Result<Coordinate, SpaceError> {
        self.lattice.displacement(p, q)
    }

    /// Add a displacement to a position.
    pub fn rel_to_abs(&self, c: &Coordinate, d: &Coordinate) -> Result<Coordinate, SpaceError> {
        self.lattice.rel_to_abs(c, d)
    }

    /// Lattice distance between two positions (boundary not applied).
    pub fn l1_distance(&self, p: &Coordinate, q: &Coordinate) -> Result<u32, SpaceError> {
        self.lattice.l1_distance(p, q)
    }

    /// Nearest neighbours of `coord` in lattice rotational order.
    pub fn neighbors(&self, coord: &Coordinate, mode: BoundaryMode) -> Result<Neighbors, SpaceError> {
        let ring = self.lattice.annulus(coord, 1)?;
        let mut out = Neighbors::new();
        for raw in ring {
            if let Some(mapped) = self.filter(raw, mode)? {
                out.push(mapped);
            }
        }
        Ok(out)
    }

    /// All positions at distance `r` from `coord`, filtered by `mode`.
    pub fn annulus(
        &self,
        coord: &Coordinate,
        r: u32,
        mode: BoundaryMode,
    ) -> Result<Vec<Coordinate>, SpaceError> {
        let ring = self.lattice.annulus(coord, r)?;
        let mut out = Vec::with_capacity(ring.len());
        for raw in ring {
            if let Some(mapped) = self.filter(raw, mode)? {
                out.push(mapped);
            }
        }
        Ok(out)
    }

    fn filter(&self, raw: Coordinate, mode: BoundaryMode) -> Result<Option<Coordinate>, SpaceError> {
        match mode {
            BoundaryMode::Apply => self.boundary.apply(&raw),
            BoundaryMode::Exclude => Ok(self.is_in_bounds(&raw).then_some(raw)),
            BoundaryMode::Ignore => Ok(Some(raw)),
        }
    }

    /// A geometry of the same lattice kind, shape kind and boundary
    /// policy with every linear dimension scaled by `factor`.
    pub fn clone_at_scale(&self, factor: f64) -> Result<Self, SpaceError> {
        let shape = self.shape.clone_at_scale(self.lattice, factor)?;
        Self::new(self.lattice, shape, self.boundary.kind())
    }
}
