//! Lattice connectivity: basis vectors, displacement arithmetic, and
//! neighbour rings.
//!
//! A [`Lattice`] knows nothing about extent; it answers questions about
//! the infinite integer plane (or line) it tiles. Shapes and boundaries
//! layer finite extent on top.
//!
//! # Coordinate frames
//!
//! Triangular lattices store sites in *lattice* (axial) coordinates, where
//! the six neighbours of `(x, y)` are `(x±1, y)`, `(x, y±1)`, `(x+1, y+1)`
//! and `(x-1, y-1)`. [`Lattice::adjust`] maps offset-column coordinates
//! (the natural frame for rectangles) into lattice coordinates and
//! [`Lattice::inv_adjust`] maps back. Rectangular and linear lattices use
//! a single frame and both maps are the identity.

use crate::error::{require, SpaceError};
use colony_core::{Coordinate, Flags};

const RECTANGULAR_BASIS: [Coordinate; 2] = [Coordinate::vector(1, 0), Coordinate::vector(0, 1)];

const TRIANGULAR_BASIS: [Coordinate; 3] = [
    Coordinate::vector(1, 0),
    Coordinate::vector(1, 1),
    Coordinate::vector(0, 1),
];

const LINEAR_BASIS: [Coordinate; 1] = [Coordinate::vector(0, 1)];

/// The closed set of supported lattices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lattice {
    /// Square lattice with 4-connectivity (von Neumann neighbourhood).
    Rectangular,
    /// Triangular lattice with 6-connectivity (hexagonal cells).
    Triangular,
    /// One-dimensional lattice along the y axis.
    Linear,
}

impl Lattice {
    /// Number of spatial dimensions.
    pub const fn dimensionality(self) -> usize {
        match self {
            Self::Rectangular | Self::Triangular => 2,
            Self::Linear => 1,
        }
    }

    /// Number of nearest neighbours of every site.
    ///
    /// Every annulus of radius `r > 0` has exactly `connectivity() * r`
    /// members.
    pub const fn connectivity(self) -> usize {
        match self {
            Self::Rectangular => 4,
            Self::Triangular => 6,
            Self::Linear => 2,
        }
    }

    /// Basis directions in lattice coordinates.
    ///
    /// Triangular lattices expose `u = (1,0)`, `v = (1,1)`, `w = (0,1)`.
    pub fn basis(self) -> &'static [Coordinate] {
        match self {
            Self::Rectangular => &RECTANGULAR_BASIS,
            Self::Triangular => &TRIANGULAR_BASIS,
            Self::Linear => &LINEAR_BASIS,
        }
    }

    /// Map an offset-frame position into lattice coordinates.
    pub fn adjust(self, c: &Coordinate) -> Result<Coordinate, SpaceError> {
        require(c, Flags::PLANAR, "adjust")?;
        let (x, y) = self.adjust_xy(c.x(), c.y());
        Ok(Coordinate::new(x, y, c.z(), c.flags()))
    }

    /// Map a lattice-frame position back into offset coordinates.
    pub fn inv_adjust(self, c: &Coordinate) -> Result<Coordinate, SpaceError> {
        require(c, Flags::PLANAR, "inv_adjust")?;
        let (x, y) = self.inv_adjust_xy(c.x(), c.y());
        Ok(Coordinate::new(x, y, c.z(), c.flags()))
    }

    pub(crate) fn adjust_xy(self, x: i32, y: i32) -> (i32, i32) {
        match self {
            Self::Triangular => (x, y + x.div_euclid(2)),
            Self::Rectangular | Self::Linear => (x, y),
        }
    }

    pub(crate) fn inv_adjust_xy(self, x: i32, y: i32) -> (i32, i32) {
        match self {
            Self::Triangular => (x, y - x.div_euclid(2)),
            Self::Rectangular | Self::Linear => (x, y),
        }
    }

    /// Displacement from `p` to `q`.
    ///
    /// Rectangular and linear lattices return a planar vector. Triangular
    /// lattices return the minimal decomposition `(u, v, w)` over the
    /// basis, with at most two non-zero components that are adjacent
    /// directions, so the hex distance is the component norm.
    pub fn displacement(self, p: &Coordinate, q: &Coordinate) -> Result<Coordinate, SpaceError> {
        require(p, Flags::PLANAR, "displacement")?;
        require(q, Flags::PLANAR, "displacement")?;
        let dx = q.x() - p.x();
        let dy = q.y() - p.y();
        Ok(match self {
            Self::Rectangular => Coordinate::vector(dx, dy),
            Self::Linear => Coordinate::vector(0, dy),
            Self::Triangular => {
                let (u, v, w) = decompose(dx, dy);
                Coordinate::vector3(u, v, w)
            }
        })
    }

    /// Add a displacement to an absolute position.
    ///
    /// On a triangular lattice the displacement's components are read as
    /// `(u, v, w)` basis coefficients.
    pub fn rel_to_abs(self, c: &Coordinate, d: &Coordinate) -> Result<Coordinate, SpaceError> {
        require(c, Flags::PLANAR, "rel_to_abs")?;
        require(d, Flags::VECTOR, "rel_to_abs")?;
        Ok(match self {
            Self::Rectangular | Self::Linear => Coordinate::planar(c.x() + d.x(), c.y() + d.y()),
            Self::Triangular => {
                let [u, v, w] = d.components();
                Coordinate::planar(c.x() + u + v, c.y() + v + w)
            }
        })
    }

    /// Displacement from `p` to `q` measured in the offset frame.
    pub fn orthogonal_displacement(
        self,
        p: &Coordinate,
        q: &Coordinate,
    ) -> Result<Coordinate, SpaceError> {
        let p = self.inv_adjust(p)?;
        let q = self.inv_adjust(q)?;
        Ok(Coordinate::vector(q.x() - p.x(), q.y() - p.y()))
    }

    /// Lattice (graph) distance between two positions.
    pub fn l1_distance(self, p: &Coordinate, q: &Coordinate) -> Result<u32, SpaceError> {
        Ok(self.displacement(p, q)?.norm())
    }

    /// All positions at lattice distance exactly `r` from `center`.
    ///
    /// `r == 0` yields `[center]`. Otherwise the ring is traversed edge by
    /// edge in a fixed rotational order, producing
    /// `connectivity() * r` positions with no repeats. Fails with
    /// [`SpaceError::RadiusOutOfRange`] when the ring would leave `i32`.
    pub fn annulus(self, center: &Coordinate, r: u32) -> Result<Vec<Coordinate>, SpaceError> {
        require(center, Flags::PLANAR, "annulus")?;
        let center = center.canonical();
        if r == 0 {
            return Ok(vec![center]);
        }
        let (x, y) = (center.x(), center.y());
        let out_of_range = SpaceError::RadiusOutOfRange { center, radius: r };
        let r = i32::try_from(r).map_err(|_| out_of_range.clone())?;
        let fits = r <= i32::MAX / self.connectivity() as i32
            && x.checked_sub(r).zip(x.checked_add(r)).is_some()
            && y.checked_sub(r).zip(y.checked_add(r)).is_some();
        if !fits {
            return Err(out_of_range);
        }
        let mut ring = Vec::with_capacity(self.connectivity() * r as usize);
        match self {
            Self::Rectangular => {
                // North corner, clockwise through east, south and west.
                for i in 0..r {
                    ring.push(Coordinate::planar(x + i, y + r - i));
                }
                for i in 0..r {
                    ring.push(Coordinate::planar(x + r - i, y - i));
                }
                for i in 0..r {
                    ring.push(Coordinate::planar(x - i, y - r + i));
                }
                for i in 0..r {
                    ring.push(Coordinate::planar(x - r + i, y + i));
                }
            }
            Self::Triangular => {
                // Start at center - r*v and walk +w, +v, +u, -w, -v, -u.
                const STEPS: [(i32, i32); 6] = [(0, 1), (1, 1), (1, 0), (0, -1), (-1, -1), (-1, 0)];
                let (mut cx, mut cy) = (x - r, y - r);
                for (sx, sy) in STEPS {
                    for _ in 0..r {
                        ring.push(Coordinate::planar(cx, cy));
                        cx += sx;
                        cy += sy;
                    }
                }
            }
            Self::Linear => {
                ring.push(Coordinate::planar(x, y + r));
                ring.push(Coordinate::planar(x, y - r));
            }
        }
        Ok(ring)
    }
}

/// Minimal `(u, v, w)` decomposition of a lattice-frame offset.
///
/// First and third quadrants use `u`/`v` or `v`/`w` depending on which
/// axis dominates; mixed-sign offsets use `u` and `w` directly.
pub(crate) fn decompose(dx: i32, dy: i32) -> (i32, i32, i32) {
    let same_sign = (dx >= 0 && dy >= 0) || (dx <= 0 && dy <= 0);
    if !same_sign {
        return (dx, 0, dy);
    }
    if dx.abs() >= dy.abs() {
        (dx - dy, dy, 0)
    } else {
        (0, dx, dy - dx)
    }
}
