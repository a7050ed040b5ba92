//! Error types for zstack
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::{WidgetId, Z};
use std::io;
use thiserror::Error;

/// Result type alias for zstack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the widget store
#[derive(Debug, Error)]
pub enum Error {
    /// No widget is stored under the requested id
    #[error("Widget not found: {0}")]
    NotFound(WidgetId),

    /// Rejected input (validation failure, id change, malformed patch)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Making room at this Z would push a widget past `Z::MAX`
    #[error("Z overflow: no room above z={z}")]
    ZOverflow {
        /// The Z that could not be freed or assigned
        z: Z,
    },

    /// Identity and ordering indices disagree
    ///
    /// Only reported by the non-panicking consistency checker. Reaching this
    /// is a bug in the store, not a recoverable condition.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build an `InvalidInput` error from anything displayable
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Build a `Config` error from anything displayable
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// True if this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True if this is an `InvalidInput` error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidInput(e.to_string())
    }
}
