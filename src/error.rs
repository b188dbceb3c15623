//! Error types
//!
//! Input and export failures. The estimator and report formatter cannot fail.

use thiserror::Error;

/// Rejected edits to a calculator input
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Unknown input field: {0}")]
    UnknownField(String),

    #[error("{field}: '{raw}' is not a number")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field}: value must be a finite number")]
    NotFinite { field: &'static str },

    #[error("Input values are too large to estimate")]
    OutOfRange,
}

/// Failures while handing a report to the file-save collaborator
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InputResult<T> = Result<T, InputError>;
