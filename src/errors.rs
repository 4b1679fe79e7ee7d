/*!
 * Error types for the subsequence application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the sequence-generation pipeline
#[derive(Error, Debug)]
pub enum SequenceError {
    /// A required timestamp does not match its expected shape
    #[error("Invalid timestamp format: {0}")]
    Format(String),

    /// A source file could not be opened or decoded
    #[error("Cannot read source file {path:?}: {reason}")]
    SourceUnreadable {
        /// Path of the file that failed to load
        path: PathBuf,
        /// Underlying failure description
        reason: String,
    },

    /// The pipeline computed zero clips from the given inputs
    #[error("No clips were produced from the given inputs")]
    EmptyResult,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the sequence pipeline
    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
