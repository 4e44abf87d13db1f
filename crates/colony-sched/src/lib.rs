//! Weighted stochastic scheduling for Colony simulations.
//!
//! Each event the [`Scheduler`] asks every stochastic [`Process`] how much
//! propensity it has against the current [`CellLayer`](colony_layer::CellLayer),
//! lays the weights out in a [`RangeMap`], and picks one with a uniform
//! draw. The clock advances by an exponential waiting time whose rate is
//! the total weight. Every-step processes then run in registration order.
//!
//! All randomness flows from one seeded `ChaCha8Rng` through the
//! [`UniformSource`] trait, so a run is reproducible from its seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod draw;
pub mod error;
pub mod gillespie;
pub mod halt;
pub mod process;
pub mod range_map;
pub mod scheduler;
pub mod step;

pub use config::{ConfigError, SchedulerConfig};
pub use draw::UniformSource;
pub use error::SchedError;
pub use gillespie::{GillespieChooser, GillespieState};
pub use halt::HaltCondition;
pub use process::{Process, ProcessKind, StepContext};
pub use range_map::RangeMap;
pub use scheduler::{Scheduler, StepReport};
pub use step::StepState;
