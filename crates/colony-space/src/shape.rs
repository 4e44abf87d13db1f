//! Finite regions of a lattice and their canonical site ordering.
//!
//! A [`Shape`] enumerates its sites once at construction. The enumeration
//! order is stable and is the row order used by serialization: the
//! `i`-th canonical site always has index `i`.

use crate::error::{require, SpaceError};
use crate::lattice::{decompose, Lattice};
use colony_core::{Coordinate, Flags};
use indexmap::IndexSet;

/// Largest accepted width, height, length or radius.
pub const MAX_EXTENT: u32 = 1 << 15;

/// Which region a [`Shape`] covers, with its size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned rectangle in the offset frame.
    Rectangle {
        /// Number of columns.
        width: u32,
        /// Number of rows.
        height: u32,
    },
    /// Regular hexagon centred at `(radius, radius)`.
    Hexagon {
        /// Ring count around the centre site.
        radius: u32,
    },
    /// Segment of the y axis starting at the origin.
    Line {
        /// Number of sites.
        length: u32,
    },
}

impl ShapeKind {
    /// Short name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Hexagon { .. } => "hexagon",
            Self::Line { .. } => "line",
        }
    }

    fn supports(&self, lattice: Lattice) -> bool {
        matches!(
            (self, lattice),
            (Self::Rectangle { .. }, Lattice::Rectangular | Lattice::Triangular)
                | (Self::Hexagon { .. }, Lattice::Triangular)
                | (Self::Line { .. }, Lattice::Linear)
        )
    }
}

/// A finite, immutable set of lattice sites in canonical order.
///
/// Two shapes are equal when they have the same kind and dimensions,
/// regardless of lattice.
#[derive(Clone, Debug)]
pub struct Shape {
    kind: ShapeKind,
    lattice: Lattice,
    sites: IndexSet<Coordinate>,
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Shape {}

impl Shape {
    /// Build a shape of the given kind on `lattice`.
    pub fn new(lattice: Lattice, kind: ShapeKind) -> Result<Self, SpaceError> {
        if !kind.supports(lattice) {
            return Err(SpaceError::IncompatibleLattice {
                shape: kind.name(),
                lattice,
            });
        }
        match kind {
            ShapeKind::Rectangle { width, height } => {
                check_extent("width", width as u64)?;
                check_extent("height", height as u64)?;
            }
            ShapeKind::Hexagon { radius } => check_radius(radius as u64)?,
            ShapeKind::Line { length } => check_extent("length", length as u64)?,
        }
        let mut shape = Self {
            kind,
            lattice,
            sites: IndexSet::new(),
        };
        shape.calc_sites()?;
        Ok(shape)
    }

    /// Rectangle of `width` columns by `height` rows.
    pub fn rectangle(lattice: Lattice, width: u32, height: u32) -> Result<Self, SpaceError> {
        Self::new(lattice, ShapeKind::Rectangle { width, height })
    }

    /// Hexagon with `radius` rings around its centre.
    pub fn hexagon(lattice: Lattice, radius: u32) -> Result<Self, SpaceError> {
        Self::new(lattice, ShapeKind::Hexagon { radius })
    }

    /// Line of `length` sites.
    pub fn line(lattice: Lattice, length: u32) -> Result<Self, SpaceError> {
        Self::new(lattice, ShapeKind::Line { length })
    }

    fn calc_sites(&mut self) -> Result<(), SpaceError> {
        match self.kind {
            ShapeKind::Rectangle { width, height } => {
                // Column snake: even columns ascend, odd columns descend.
                let h = height as i32;
                for x in 0..width as i32 {
                    for i in 0..h {
                        let y = if x % 2 == 0 { i } else { h - 1 - i };
                        self.include(self.offset_site(x, y))?;
                    }
                }
            }
            ShapeKind::Hexagon { radius } => {
                let center = self.center();
                for r in 0..=radius {
                    for site in self.lattice.annulus(&center, r)? {
                        self.include(site)?;
                    }
                }
            }
            ShapeKind::Line { length } => {
                for y in 0..length as i32 {
                    self.include(Coordinate::planar(0, y))?;
                }
            }
        }
        Ok(())
    }

    fn include(&mut self, site: Coordinate) -> Result<(), SpaceError> {
        if self.sites.insert(site) {
            Ok(())
        } else {
            Err(SpaceError::DuplicateSite { coord: site })
        }
    }

    fn offset_site(&self, x: i32, y: i32) -> Coordinate {
        let (x, y) = self.lattice.adjust_xy(x, y);
        Coordinate::planar(x, y)
    }

    /// The shape's kind and size.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The lattice the shape is laid out on.
    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Number of canonical sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always false; every shape has at least one site.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Owned copy of the canonical sites in index order.
    pub fn canonical_sites(&self) -> Vec<Coordinate> {
        self.sites.iter().copied().collect()
    }

    /// Iterate the canonical sites in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.sites.iter()
    }

    /// The canonical site at `index`.
    pub fn site(&self, index: usize) -> Option<Coordinate> {
        self.sites.get_index(index).copied()
    }

    /// True if `coord` is a canonical site (boundary marker ignored).
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.sites.contains(coord)
    }

    /// Row index of a canonical site.
    pub fn coord_to_index(&self, coord: &Coordinate) -> Result<usize, SpaceError> {
        self.sites
            .get_index_of(coord)
            .ok_or(SpaceError::NotCanonical { coord: *coord })
    }

    /// The centre site.
    pub fn center(&self) -> Coordinate {
        match self.kind {
            ShapeKind::Rectangle { width, height } => {
                self.offset_site((width as i32 - 1) / 2, (height as i32 - 1) / 2)
            }
            ShapeKind::Hexagon { radius } => Coordinate::planar(radius as i32, radius as i32),
            ShapeKind::Line { length } => Coordinate::planar(0, (length as i32 - 1) / 2),
        }
    }

    /// Sites on the outer edge of the shape, without repeats.
    ///
    /// Rectangles walk the perimeter clockwise from the origin: up the
    /// left column, right along the top row, down the right column and
    /// back along the bottom row.
    pub fn boundaries(&self) -> Vec<Coordinate> {
        let mut edge = IndexSet::new();
        match self.kind {
            ShapeKind::Rectangle { width, height } => {
                let (w, h) = (width as i32, height as i32);
                for y in 0..h {
                    edge.insert(self.offset_site(0, y));
                }
                for x in 1..w {
                    edge.insert(self.offset_site(x, h - 1));
                }
                for y in (0..h - 1).rev() {
                    edge.insert(self.offset_site(w - 1, y));
                }
                for x in (1..w - 1).rev() {
                    edge.insert(self.offset_site(x, 0));
                }
            }
            ShapeKind::Hexagon { radius } => {
                let center = self.center();
                // The centre is planar, so the ring is always computable.
                if let Ok(ring) = self.lattice.annulus(&center, radius) {
                    edge.extend(ring);
                }
            }
            ShapeKind::Line { length } => {
                edge.insert(Coordinate::planar(0, 0));
                edge.insert(Coordinate::planar(0, length as i32 - 1));
            }
        }
        edge.into_iter().collect()
    }

    /// Size along each axis.
    ///
    /// Rectangles report `[width, height]`, lines `[length]`, and hexagons
    /// `[2r + 1; 3]` (extent along each of the three triangular axes).
    pub fn dimensions(&self) -> Vec<u32> {
        match self.kind {
            ShapeKind::Rectangle { width, height } => vec![width, height],
            ShapeKind::Hexagon { radius } => vec![2 * radius + 1; 3],
            ShapeKind::Line { length } => vec![length],
        }
    }

    /// How far, and in which direction, `coord` lies outside the shape.
    ///
    /// Returns a displacement that is zero for every in-bounds position.
    /// Rectangles and lines report per-axis excess in the offset frame.
    /// Hexagons report a `(u, v, w)` displacement whose norm is the hex
    /// distance beyond the outer ring.
    pub fn overbounds(&self, coord: &Coordinate) -> Result<Coordinate, SpaceError> {
        require(coord, Flags::PLANAR, "overbounds")?;
        match self.kind {
            ShapeKind::Rectangle { width, height } => {
                let o = self.lattice.inv_adjust(coord)?;
                Ok(Coordinate::vector(
                    excess(o.x(), width),
                    excess(o.y(), height),
                ))
            }
            ShapeKind::Line { length } => {
                Ok(Coordinate::vector(excess(coord.x(), 1), excess(coord.y(), length)))
            }
            ShapeKind::Hexagon { radius } => {
                let center = self.center();
                let (u, v, w) = decompose(coord.x() - center.x(), coord.y() - center.y());
                Ok(hex_overbounds([u, v, w], radius as i32))
            }
        }
    }

    /// Offset-frame period `(x, y)` used to wrap positions, if the shape
    /// tiles the plane by translation.
    pub(crate) fn periodic_extent(&self) -> Option<(i32, i32)> {
        match self.kind {
            ShapeKind::Rectangle { width, height } => Some((width as i32, height as i32)),
            ShapeKind::Line { length } => Some((1, length as i32)),
            ShapeKind::Hexagon { .. } => None,
        }
    }

    /// The same kind of shape with every linear dimension multiplied by
    /// `factor` (rounded down), laid out on `lattice`.
    pub fn clone_at_scale(&self, lattice: Lattice, factor: f64) -> Result<Self, SpaceError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SpaceError::InvalidScale { factor });
        }
        let kind = match self.kind {
            ShapeKind::Rectangle { width, height } => ShapeKind::Rectangle {
                width: scale_dim("width", width, factor)?,
                height: scale_dim("height", height, factor)?,
            },
            ShapeKind::Hexagon { radius } => ShapeKind::Hexagon {
                radius: scale_dim("radius", radius, factor)?,
            },
            ShapeKind::Line { length } => ShapeKind::Line {
                length: scale_dim("length", length, factor)?,
            },
        };
        Self::new(lattice, kind)
    }
}

fn check_extent(name: &'static str, value: u64) -> Result<(), SpaceError> {
    if value == 0 || value > MAX_EXTENT as u64 {
        return Err(SpaceError::InvalidDimension { name, value });
    }
    Ok(())
}

fn check_radius(value: u64) -> Result<(), SpaceError> {
    if value > MAX_EXTENT as u64 {
        return Err(SpaceError::InvalidDimension {
            name: "radius",
            value,
        });
    }
    Ok(())
}

fn scale_dim(name: &'static str, dim: u32, factor: f64) -> Result<u32, SpaceError> {
    let scaled = (dim as f64 * factor).floor();
    if scaled > MAX_EXTENT as f64 {
        return Err(SpaceError::InvalidDimension {
            name,
            value: u64::MAX,
        });
    }
    Ok(scaled as u32)
}

/// Distance of `value` outside `0..extent`, signed by side.
fn excess(value: i32, extent: u32) -> i32 {
    let max = extent as i32 - 1;
    if value < 0 {
        value
    } else if value > max {
        value - max
    } else {
        0
    }
}

/// Hexagon overbounds from a minimal `(u, v, w)` displacement.
///
/// The excess beyond `radius` is taken from the smaller-magnitude
/// component first. Equal magnitudes prefer `u`, then `w`, then `v`.
fn hex_overbounds(components: [i32; 3], radius: i32) -> Coordinate {
    let total: i32 = components.iter().map(|c| c.abs()).sum();
    let mut remaining = total - radius;
    if remaining <= 0 {
        return Coordinate::vector3(0, 0, 0);
    }
    // Axis indices in tie-break preference order: u, w, v.
    let mut order = [0usize, 2, 1];
    order.sort_by_key(|&axis| {
        let magnitude = components[axis].abs();
        // Absent axes sort last.
        if magnitude == 0 {
            i32::MAX
        } else {
            magnitude
        }
    });
    let mut out = [0i32; 3];
    for axis in order {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(components[axis].abs());
        out[axis] = take * components[axis].signum();
        remaining -= take;
    }
    Coordinate::vector3(out[0], out[1], out[2])
}
