/// Hard failures raised while handling a classified text
///
/// These are the errors the processing pipeline catches and reports through the
/// envelope's `error` field. Domain-level problems such as an empty CSV are not
/// errors; they are reported inside the summary instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The text could not be parsed as JSON
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The text could not be read as CSV
    #[error("{0}")]
    InvalidCsv(#[from] csv::Error),

    /// An extracted numeric token did not parse as a floating point value
    #[error("could not convert string to float: '{value}'")]
    InvalidNumber { value: String },

    /// A quick tool was given input it cannot work with
    #[error("{0}")]
    InvalidInput(String),
}
