//! Reference processes for Colony simulations.
//!
//! | Process | Kind | Weight |
//! |---------|------|--------|
//! | [`Divide`] | stochastic | `rate × divisible agents` |
//! | [`ShovingDivide`] | stochastic | `rate × divisible agents` |
//! | [`Death`] | stochastic | `rate × occupied sites` |
//! | [`UniformBiomassGrowth`] | every step | none |
//! | [`TargetedBiomassGrowth`] | every step | none |
//! | [`CheckForExtinction`] | every step | none |
//!
//! All of them are generic over the layer's [`Agent`](colony_layer::Agent)
//! type and draw randomness only through the
//! [`StepContext`](colony_sched::StepContext) they are fired with.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod death;
pub mod divide;
pub mod extinction;
pub mod growth;
pub mod shoving;

pub use death::Death;
pub use divide::{Divide, DIVISION_CHANNEL};
pub use extinction::CheckForExtinction;
pub use growth::{TargetedBiomassGrowth, UniformBiomassGrowth};
pub use shoving::ShovingDivide;
