//! Error types for weighted selection.

use colony_core::ProcessId;
use std::fmt;

/// Errors arising from weight registration or target selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedError {
    /// A weight was negative, NaN, or infinite.
    InvalidWeight {
        /// The key the weight was registered for.
        key: String,
        /// The rejected weight.
        weight: f64,
    },
    /// A selection draw fell outside `[0, total)`.
    DrawOutOfRange {
        /// The draw.
        draw: f64,
        /// Total registered weight.
        total: f64,
    },
    /// The same key was registered twice.
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// Selection was attempted with nothing registered.
    EmptySelection,
    /// The chooser selected a process the scheduler does not own.
    UnknownProcess {
        /// The selected id.
        id: ProcessId,
    },
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWeight { key, weight } => {
                write!(f, "weight for {key} must be finite and non-negative, got {weight}")
            }
            Self::DrawOutOfRange { draw, total } => {
                write!(f, "draw {draw} outside [0, {total})")
            }
            Self::DuplicateKey { key } => write!(f, "{key} registered twice"),
            Self::EmptySelection => write!(f, "no targets registered"),
            Self::UnknownProcess { id } => write!(f, "selected unknown process {id}"),
        }
    }
}

impl std::error::Error for SchedError {}
