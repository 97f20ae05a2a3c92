//! Error types for the SpamSift library.
//!
//! Every fallible operation in the crate returns [`SpamSiftError`] through the
//! [`Result`] alias. Classification failures that are meant for the user
//! (empty input, missing model selection, unavailable artifacts) are modelled
//! separately as [`Notice`](crate::service::Notice) and only wrapped here when
//! they have to leave the library, e.g. from a CLI command.
//!
//! # Examples
//!
//! ```
//! use spamsift::error::{Result, SpamSiftError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpamSiftError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::service::Notice;

/// The main error type for SpamSift operations.
#[derive(Error, Debug)]
pub enum SpamSiftError {
    /// I/O errors (file operations, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Artifact file errors (bad header, checksum, kind or version)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model errors (inconsistent parameters, dimension mismatches)
    #[error("Model error: {0}")]
    Model(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A classification request was refused
    #[error("{0}")]
    Notice(#[from] Notice),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SpamSiftError.
pub type Result<T> = std::result::Result<T, SpamSiftError>;

impl SpamSiftError {
    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Artifact(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Model(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::SerializationError(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
