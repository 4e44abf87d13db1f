//! Lattice coordinates and their semantic flags.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitOr, BitOrAssign};

/// Bit set describing what a [`Coordinate`] means.
///
/// `PLANAR` and `VECTOR` are semantic: an absolute 2-D site and a
/// displacement with the same components are different values.
/// `BOUNDARY_APPLIED` is a transient marker and never participates in
/// equality, hashing, or ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Flags(u32);

impl Flags {
    /// No flags set.
    pub const NONE: Flags = Flags(0);
    /// Absolute position on a two-dimensional lattice.
    pub const PLANAR: Flags = Flags(1);
    /// Relative displacement rather than a position.
    pub const VECTOR: Flags = Flags(1 << 1);
    /// The coordinate was remapped by a boundary condition.
    pub const BOUNDARY_APPLIED: Flags = Flags(1 << 2);
    /// Sentinel for a site that fell off an absorbing boundary.
    pub const END_OF_WORLD: Flags = Flags(1 << 3);

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Bitwise union.
    pub const fn union(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }

    /// `self` with every bit of `other` cleared.
    pub const fn difference(self, other: Flags) -> Flags {
        Flags(self.0 & !other.0)
    }

    /// True if no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Flags that take part in coordinate identity.
    const fn semantic(self) -> Flags {
        self.difference(Flags::BOUNDARY_APPLIED)
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        self.union(rhs)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Flags, &str); 4] = [
            (Flags::PLANAR, "PLANAR"),
            (Flags::VECTOR, "VECTOR"),
            (Flags::BOUNDARY_APPLIED, "BOUNDARY_APPLIED"),
            (Flags::END_OF_WORLD, "END_OF_WORLD"),
        ];
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// An integer lattice coordinate with up to three components.
///
/// Planar coordinates use `x` and `y` with `z == 0`. Displacements on a
/// triangular lattice use all three components as coefficients of the
/// `u`, `v`, `w` basis directions.
#[derive(Clone, Copy, Debug)]
pub struct Coordinate {
    x: i32,
    y: i32,
    z: i32,
    flags: Flags,
}

impl Coordinate {
    /// Construct a coordinate from raw components and flags.
    pub const fn new(x: i32, y: i32, z: i32, flags: Flags) -> Self {
        Self { x, y, z, flags }
    }

    /// An absolute planar position.
    pub const fn planar(x: i32, y: i32) -> Self {
        Self::new(x, y, 0, Flags::PLANAR)
    }

    /// A planar displacement.
    pub const fn vector(x: i32, y: i32) -> Self {
        Self::new(x, y, 0, Flags::PLANAR.union(Flags::VECTOR))
    }

    /// A three-axis displacement (triangular basis coefficients).
    pub const fn vector3(u: i32, v: i32, w: i32) -> Self {
        Self::new(u, v, w, Flags::VECTOR)
    }

    /// The absorbing-boundary sentinel.
    pub const fn end_of_world() -> Self {
        Self::new(
            0,
            0,
            0,
            Flags::END_OF_WORLD.union(Flags::BOUNDARY_APPLIED),
        )
    }

    /// First component.
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Second component.
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Third component.
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// All three components.
    pub const fn components(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// The full flag set, including transient markers.
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// True if every bit of `flag` is set.
    pub const fn has_flag(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }

    /// Copy with `flag` added.
    pub const fn with_flag(self, flag: Flags) -> Self {
        Self::new(self.x, self.y, self.z, self.flags.union(flag))
    }

    /// Copy with `flag` cleared.
    pub const fn without_flag(self, flag: Flags) -> Self {
        Self::new(self.x, self.y, self.z, self.flags.difference(flag))
    }

    /// Copy with the boundary marker stripped.
    pub const fn canonical(self) -> Self {
        self.without_flag(Flags::BOUNDARY_APPLIED)
    }

    /// True for the absorbing-boundary sentinel.
    pub const fn is_end_of_world(&self) -> bool {
        self.has_flag(Flags::END_OF_WORLD)
    }

    /// True if every component is zero.
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    /// Sum of absolute component values.
    pub fn norm(&self) -> u32 {
        self.x.unsigned_abs() + self.y.unsigned_abs() + self.z.unsigned_abs()
    }

    /// Every component multiplied by `k`; flags are kept.
    pub const fn scaled(self, k: i32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k, self.flags)
    }

    fn key(&self) -> (i32, i32, i32, Flags) {
        (self.x, self.y, self.z, self.flags.semantic())
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {} | {})", self.x, self.y, self.z, self.flags)
    }
}
