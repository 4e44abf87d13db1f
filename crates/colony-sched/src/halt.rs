//! Why a run stopped.

use crate::error::SchedError;
use colony_layer::LayerError;
use std::error::Error;
use std::fmt;

/// Terminal outcome of a scheduler step.
///
/// The first four variants are ordinary simulation endings. `Layer` and
/// `Schedule` are faults: an update or selection invariant was violated
/// and the layer may be in an unspecified state.
#[derive(Clone, Debug, PartialEq)]
pub enum HaltCondition {
    /// The last agent disappeared.
    Extinction {
        /// Simulation time of the event that emptied the layer.
        time: f64,
        /// Frames completed.
        frame: u64,
    },
    /// The configured step limit was reached.
    StepLimit {
        /// Frames completed.
        frame: u64,
    },
    /// The configured time limit was reached.
    TimeLimit {
        /// Simulation time reached.
        time: f64,
    },
    /// No process registered a positive weight.
    Stalled {
        /// Simulation time.
        time: f64,
        /// Frames completed.
        frame: u64,
    },
    /// A layer update failed.
    Layer(LayerError),
    /// Event selection failed.
    Schedule(SchedError),
}

impl HaltCondition {
    /// True for `Layer` and `Schedule`.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Layer(_) | Self::Schedule(_))
    }
}

impl fmt::Display for HaltCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extinction { time, frame } => {
                write!(f, "extinction at t={time} (frame {frame})")
            }
            Self::StepLimit { frame } => write!(f, "step limit reached at frame {frame}"),
            Self::TimeLimit { time } => write!(f, "time limit reached at t={time}"),
            Self::Stalled { time, frame } => {
                write!(f, "no eligible events at t={time} (frame {frame})")
            }
            Self::Layer(e) => write!(f, "layer fault: {e}"),
            Self::Schedule(e) => write!(f, "schedule fault: {e}"),
        }
    }
}

impl Error for HaltCondition {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layer(e) => Some(e),
            Self::Schedule(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LayerError> for HaltCondition {
    fn from(e: LayerError) -> Self {
        Self::Layer(e)
    }
}

impl From<SchedError> for HaltCondition {
    fn from(e: SchedError) -> Self {
        Self::Schedule(e)
    }
}
