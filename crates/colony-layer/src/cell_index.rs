//! Coordinate sets that ignore the boundary marker.

use colony_core::{Coordinate, Flags};
use indexmap::IndexSet;

/// A set of sites with O(1) insert, remove and membership.
///
/// Iteration follows insertion order until the first removal; removal
/// moves the last member into the vacated slot. Callers that need a
/// stable order (such as canonical site order) sort on the way out.
///
/// Stored coordinates have [`Flags::BOUNDARY_APPLIED`] stripped, so a
/// boundary-remapped coordinate and its canonical form are the same
/// member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellIndex {
    sites: IndexSet<Coordinate>,
}

impl CellIndex {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `coord`. Returns false if it was already present.
    pub fn add(&mut self, coord: &Coordinate) -> bool {
        self.sites.insert(coord.without_flag(Flags::BOUNDARY_APPLIED))
    }

    /// Remove `coord`. Returns false if it was absent.
    pub fn remove(&mut self, coord: &Coordinate) -> bool {
        self.sites.swap_remove(coord)
    }

    /// Membership test.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.sites.contains(coord)
    }

    /// Remove every member.
    pub fn clear(&mut self) {
        self.sites.clear();
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// True if there are no members.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Members in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.sites.iter()
    }
}

impl FromIterator<Coordinate> for CellIndex {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut index = Self::new();
        for coord in iter {
            index.add(&coord);
        }
        index
    }
}
