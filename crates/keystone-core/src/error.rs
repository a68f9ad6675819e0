//! Unified error types for the repository layers.
//!
//! These are the *hard* failures: they travel as `Err` and must be handled
//! by the caller. Business-rule outcomes (not found, missing plan, rejected
//! update) are soft failures and travel inside [`crate::Response`] instead.

use std::fmt::Debug;
use thiserror::Error;

/// MongoDB server code for a duplicate key violation.
#[cfg(feature = "mongodb")]
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Unified error type for Keystone.
#[derive(Error, Debug)]
pub enum KeystoneError {
    // ============ Argument Errors ============
    /// A required argument was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An entity failed field validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is declared but has no implementation.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Conflict error (e.g., duplicate key)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeystoneError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a database error.
    #[must_use]
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for errors raised before any I/O took place.
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Validation(_))
    }

    /// Checks if this error is retriable.
    ///
    /// Nothing in this workspace retries; the flag is for callers.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for KeystoneError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                Self::Conflict(write_error.message.clone())
            }
            ErrorKind::BsonDeserialization(e) => Self::Serialization(e.to_string()),
            ErrorKind::BsonSerialization(e) => Self::Serialization(e.to_string()),
            ErrorKind::InvalidArgument { message, .. } => Self::InvalidArgument(message.clone()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for KeystoneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON serialization error: {}", err))
    }
}
