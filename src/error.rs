//! Error types for StressScore
//!
//! Scoring itself cannot fail. These errors cover the layers around it:
//! parsing input documents, validating snapshots and encoding reports.

use thiserror::Error;

use crate::schema::ValidationError;

/// Errors that can occur while processing stress inputs
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
