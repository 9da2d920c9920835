//! Error type shared by the scheduler core and the drivers built on it.

use thiserror::Error;

/// Errors that end an optimization run.
///
/// Ratio computations in the statistics never fail; they yield `NaN`
/// through [`sdiv`](crate::scheduler::sdiv) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    /// The solution's self-consistency check failed.
    #[error("invalid solution after method '{method}': {reason}")]
    InvalidSolution { method: String, reason: String },

    /// A method was performed that has no statistics slot.
    #[error("method '{0}' is not registered with the scheduler")]
    UnknownMethod(String),

    /// A driver lacks the methods it needs to run.
    #[error("no {0} methods given")]
    NoMethods(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
