//! Per-event clock and highlight bookkeeping.

use colony_core::Coordinate;
use colony_layer::CellIndex;
use std::collections::BTreeMap;

/// State carried through one scheduler event.
///
/// Holds the simulation time at which the event started, the waiting time
/// accumulated so far, the frame number, and any sites processes chose to
/// highlight (for example newly divided cells) keyed by channel.
#[derive(Clone, Debug, PartialEq)]
pub struct StepState {
    start_time: f64,
    dt: f64,
    frame: u64,
    highlights: BTreeMap<u32, CellIndex>,
}

impl StepState {
    /// A fresh state starting at `start_time`. `frame` counts this event.
    pub fn new(start_time: f64, frame: u64) -> Self {
        Self {
            start_time,
            dt: 0.0,
            frame,
            highlights: BTreeMap::new(),
        }
    }

    /// Add `dt` to the elapsed time.
    pub fn advance_clock(&mut self, dt: f64) {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid time step {dt}");
        self.dt += dt;
    }

    /// Time at the start of the event.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Time elapsed during the event.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Current time.
    pub fn time(&self) -> f64 {
        self.start_time + self.dt
    }

    /// Frames completed once this event finishes.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Mark `coord` on `channel`.
    pub fn highlight(&mut self, channel: u32, coord: &Coordinate) {
        self.highlights.entry(channel).or_default().add(coord);
    }

    /// Sites marked on `channel`.
    pub fn highlights(&self, channel: u32) -> Option<&CellIndex> {
        self.highlights.get(&channel)
    }

    /// Channels with at least one mark, ascending.
    pub fn channels(&self) -> impl Iterator<Item = u32> + '_ {
        self.highlights.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates() {
        let mut s = StepState::new(2.0, 7);
        s.advance_clock(0.25);
        s.advance_clock(0.5);
        assert_eq!(s.dt(), 0.75);
        assert_eq!(s.time(), 2.75);
        assert_eq!(s.start_time(), 2.0);
        assert_eq!(s.frame(), 7);
    }

    #[test]
    fn highlights_by_channel() {
        let mut s = StepState::new(0.0, 0);
        s.highlight(1, &Coordinate::planar(0, 0));
        s.highlight(1, &Coordinate::planar(0, 0));
        s.highlight(3, &Coordinate::planar(1, 0));
        assert_eq!(s.highlights(1).map(CellIndex::len), Some(1));
        assert!(s.highlights(2).is_none());
        assert_eq!(s.channels().collect::<Vec<_>>(), vec![1, 3]);
    }
}
