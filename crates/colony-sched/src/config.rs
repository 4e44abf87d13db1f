//! Scheduler configuration, validation, and error types.

use colony_core::ProcessId;
use std::error::Error;
use std::fmt;

// ── SchedulerConfig ────────────────────────────────────────────────

/// Construction parameters for a [`Scheduler`](crate::Scheduler).
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Seed for the scheduler's random generator. Default: 0.
    pub seed: u64,
    /// Stop after this many events. `None` = unbounded.
    pub max_steps: Option<u64>,
    /// Stop once simulation time reaches this value. `None` = unbounded.
    pub max_time: Option<f64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_steps: None,
            max_time: None,
        }
    }
}

impl SchedulerConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == Some(0) {
            return Err(ConfigError::ZeroMaxSteps);
        }
        if let Some(value) = self.max_time {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMaxTime { value });
            }
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building a scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `max_time` is NaN, infinite, zero, or negative.
    InvalidMaxTime {
        /// The invalid value.
        value: f64,
    },
    /// `max_steps` is zero.
    ZeroMaxSteps,
    /// Two processes share an id.
    DuplicateProcess {
        /// The repeated id.
        id: ProcessId,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxTime { value } => {
                write!(f, "max_time must be finite and positive, got {value}")
            }
            Self::ZeroMaxSteps => write!(f, "max_steps must be at least 1"),
            Self::DuplicateProcess { id } => {
                write!(f, "process id {id} registered twice")
            }
        }
    }
}

impl Error for ConfigError {}
