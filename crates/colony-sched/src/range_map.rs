//! Cumulative-weight lookup table.

use crate::error::SchedError;
use std::fmt;

/// Maps a draw in `[0, total)` to the key whose half-open interval
/// contains it.
///
/// Keys occupy consecutive intervals in insertion order; key `i` owns
/// `[T(i-1), T(i))` where `T` is the running sum of weights. Zero-weight
/// keys own empty intervals and are never selected.
#[derive(Clone, Debug)]
pub struct RangeMap<K> {
    keys: Vec<K>,
    thresholds: Vec<f64>,
    total: f64,
}

impl<K> Default for RangeMap<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            thresholds: Vec::new(),
            total: 0.0,
        }
    }
}

impl<K: fmt::Debug> RangeMap<K> {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` with `weight`.
    pub fn add(&mut self, key: K, weight: f64) -> Result<(), SchedError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SchedError::InvalidWeight {
                key: format!("{key:?}"),
                weight,
            });
        }
        self.total += weight;
        self.keys.push(key);
        self.thresholds.push(self.total);
        Ok(())
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Number of keys, including zero-weight ones.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no keys were added.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The key whose interval contains `x`.
    ///
    /// `x` must lie in `[0, total_weight())`.
    pub fn select_target(&self, x: f64) -> Result<&K, SchedError> {
        if self.keys.is_empty() {
            return Err(SchedError::EmptySelection);
        }
        let out_of_range = SchedError::DrawOutOfRange {
            draw: x,
            total: self.total,
        };
        if !(0.0..self.total).contains(&x) {
            return Err(out_of_range);
        }
        let i = self.thresholds.partition_point(|&t| t <= x);
        self.keys.get(i).ok_or(out_of_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixture() -> RangeMap<u32> {
        let mut map = RangeMap::new();
        map.add(1, 0.3).unwrap();
        map.add(2, 0.2).unwrap();
        map.add(5, 0.5).unwrap();
        map
    }

    #[test]
    fn half_open_intervals() {
        let map = fixture();
        let cases = [(0.0, 1), (0.29, 1), (0.30, 2), (0.49, 2), (0.50, 5), (0.99, 5)];
        for (x, expected) in cases {
            assert_eq!(*map.select_target(x).unwrap(), expected, "x = {x}");
        }
    }

    #[test]
    fn out_of_range_draws_fail() {
        let map = fixture();
        for x in [-0.01, 1.0, 1.5, f64::NAN] {
            assert!(matches!(
                map.select_target(x),
                Err(SchedError::DrawOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn zero_weight_keys_never_selected() {
        let mut map = RangeMap::new();
        map.add("a", 0.0).unwrap();
        map.add("b", 1.0).unwrap();
        map.add("c", 0.0).unwrap();
        map.add("d", 1.0).unwrap();
        assert_eq!(*map.select_target(0.0).unwrap(), "b");
        assert_eq!(*map.select_target(0.999).unwrap(), "b");
        assert_eq!(*map.select_target(1.0).unwrap(), "d");
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn rejects_bad_weights() {
        let mut map = RangeMap::new();
        assert!(map.add(1, -0.1).is_err());
        assert!(map.add(1, f64::NAN).is_err());
        assert!(map.add(1, f64::INFINITY).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn empty_map_fails_fast() {
        let map: RangeMap<u32> = RangeMap::new();
        assert_eq!(map.select_target(0.0), Err(SchedError::EmptySelection));
    }

    #[test]
    fn all_zero_weights_select_nothing() {
        let mut map = RangeMap::new();
        map.add(1, 0.0).unwrap();
        assert!(matches!(
            map.select_target(0.0),
            Err(SchedError::DrawOutOfRange { .. })
        ));
    }

    proptest! {
        #[test]
        fn selected_key_has_positive_weight_and_contains_draw(
            weights in prop::collection::vec(0u32..5, 1..12),
            frac in 0.0f64..1.0,
        ) {
            let mut map = RangeMap::new();
            for (i, w) in weights.iter().enumerate() {
                map.add(i, *w as f64).unwrap();
            }
            let total = map.total_weight();
            prop_assume!(total > 0.0);
            let x = frac * total;
            prop_assume!(x < total);
            let i = *map.select_target(x).unwrap();
            prop_assert!(weights[i] > 0);
            let lo: u32 = weights[..i].iter().sum();
            let hi = lo + weights[i];
            prop_assert!(lo as f64 <= x && x < hi as f64);
        }
    }
}
