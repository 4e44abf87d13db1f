//! The [`Agent`] trait: what the layer needs to know about a resident.

use colony_core::StateId;

/// A cell (or other resident) occupying a lattice site.
///
/// The layer indexes each agent's state and divisibility at the moment it
/// is placed or re-indexed. Mutating an agent through anything other than
/// [`CellLayer::update`](crate::CellLayer::update) leaves the index stale
/// until [`CellLayer::apply`](crate::CellLayer::apply) is called.
pub trait Agent: Send + 'static {
    /// Discrete state (cell type).
    fn state(&self) -> StateId;

    /// Whether the agent may divide right now.
    fn is_divisible(&self) -> bool;

    /// Continuous health (biomass).
    fn health(&self) -> f64;

    /// Add `delta` to health.
    fn adjust_health(&mut self, delta: f64);

    /// Split into two agents: `self` becomes one half and the returned
    /// daughter the other.
    fn divide(&mut self) -> Self
    where
        Self: Sized;
}
