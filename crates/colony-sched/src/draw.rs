//! Uniform random draws.
//!
//! Processes and the scheduler take randomness through [`UniformSource`]
//! so tests can substitute a scripted sequence for the seeded generator.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// A source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    /// Next draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Uniform index in `0..n`, or `None` when `n == 0`.
    fn next_index(&mut self, n: usize) -> Option<usize> {
        if n == 0 {
            return None;
        }
        let i = (self.next_uniform() * n as f64) as usize;
        Some(i.min(n - 1))
    }

    /// Uniform draw in `[0, total)` for a positive, finite `total`.
    fn next_below(&mut self, total: f64) -> f64 {
        below(self.next_uniform() * total, total)
    }

    /// Exponentially distributed waiting time for an event of `rate`.
    fn next_exponential(&mut self, rate: f64) -> f64 {
        -(1.0 - self.next_uniform()).ln() / rate
    }
}

impl UniformSource for ChaCha8Rng {
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, n: usize) -> Option<usize> {
        (n > 0).then(|| self.random_range(0..n))
    }
}

/// Clamp a scaled draw that rounded up to `total` back under it.
fn below(x: f64, total: f64) -> f64 {
    if x < total {
        x
    } else {
        f64::from_bits(total.to_bits() - 1)
    }
}
