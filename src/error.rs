//! Error types for the gridlearn crate

use thiserror::Error;

use crate::types::Position;

/// Main error type for the gridlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal action '{value}' (expected one of up, down, left, right)")]
    InvalidAction { value: String },

    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{what} {position} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        what: String,
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("goal and hazard share the same cell {position}")]
    GoalIsHazard { position: Position },

    #[error("{what} {position} is placed on an obstacle")]
    BlockedCell { what: String, position: Position },

    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("episode aborted after {steps} steps without reaching a terminal cell")]
    EpisodeStepLimit { steps: usize },

    #[error("training stalled: {aborted} consecutive episodes hit the step limit")]
    TrainingStalled { aborted: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn invalid_parameter(
        name: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
