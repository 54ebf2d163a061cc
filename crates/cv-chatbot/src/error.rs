//! Command execution error types.

use thiserror::Error;

use cv_backend::BackendError;

use crate::timerange::TimeParseError;

/// Errors that terminate a command invocation.
///
/// Every variant is surfaced to the user through the dispatcher's error
/// primitive and marks the invocation `Failed`; none are retried.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("I don't know how to filter by {0}.")]
    InvalidFilter(String),

    #[error(transparent)]
    InvalidTime(#[from] TimeParseError),

    /// A menu slot produced zero choices. Prompting with an empty menu is
    /// never allowed; the command fails instead.
    #[error("No data found to filter by.")]
    EmptyChoices,
}

/// Convenience alias for command results.
pub type CommandResult<T> = Result<T, CommandError>;
