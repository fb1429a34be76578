//! Errors for constructing a simulation from caller-supplied parameters.

use thiserror::Error;

/// Invalid experiment parameters.
///
/// Only constructors return this. Once a simulator exists, `run` has no
/// failure modes.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    /// The simulation must cover at least one step.
    #[error("duration must be at least one step")]
    ZeroDuration,

    /// The posterior window must cover at least one step.
    #[error("window must be at least one step")]
    ZeroWindow,

    /// A success-probability change-point is non-finite or outside `[0, 1]`.
    #[error("probability {value} at step {step} is outside [0, 1]")]
    ProbabilityOutOfRange { step: usize, value: f64 },
}
