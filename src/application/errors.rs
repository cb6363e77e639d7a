//! Application layer error types

use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Generation error: {0}")]
    GenerationError(#[from] crate::generation::GenerationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Output error: {0}")]
    OutputError(String),
}

/// Validation errors for requests
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    #[error("Invalid SDK version: {0:?}")]
    InvalidSdkVersion(String),
}
