//! Test utilities and mock types for Colony development.
//!
//! Provides a [`MockAgent`], a scripted [`FixedDraws`] random source, and
//! standard geometry and process fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use colony_core::StateId;
use colony_layer::Agent;
use colony_sched::UniformSource;
use std::collections::VecDeque;

/// Minimal [`Agent`] with a fixed state and a health threshold for division.
///
/// Divisible once `health >= threshold`. Dividing halves health between
/// mother and daughter.
#[derive(Clone, Debug, PartialEq)]
pub struct MockAgent {
    pub state: StateId,
    pub health: f64,
    pub threshold: f64,
}

impl MockAgent {
    /// Threshold defaults to 1.0.
    pub fn new(state: StateId, health: f64) -> Self {
        Self {
            state,
            health,
            threshold: 1.0,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// A state-1 agent at health 1.0, ready to divide.
    pub fn ready() -> Self {
        Self::new(StateId(1), 1.0)
    }
}

impl Agent for MockAgent {
    fn state(&self) -> StateId {
        self.state
    }

    fn is_divisible(&self) -> bool {
        self.health >= self.threshold
    }

    fn health(&self) -> f64 {
        self.health
    }

    fn adjust_health(&mut self, delta: f64) {
        self.health += delta;
    }

    fn divide(&mut self) -> Self {
        self.health /= 2.0;
        self.clone()
    }
}

/// A [`UniformSource`] that replays a scripted sequence of draws.
///
/// Once the script runs out it repeats `fallback` (0.0 unless set).
#[derive(Clone, Debug, Default)]
pub struct FixedDraws {
    script: VecDeque<f64>,
    fallback: f64,
    taken: usize,
}

impl FixedDraws {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: draws.into_iter().collect(),
            fallback: 0.0,
            taken: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Draws consumed so far, scripted or not.
    pub fn taken(&self) -> usize {
        self.taken
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl UniformSource for FixedDraws {
    fn next_uniform(&mut self) -> f64 {
        self.taken += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
