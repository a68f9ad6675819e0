//! Result type aliases for Keystone.

use crate::KeystoneError;

/// A specialized `Result` type for Keystone operations.
pub type KeystoneResult<T> = Result<T, KeystoneError>;
