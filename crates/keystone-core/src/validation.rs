//! Argument and entity validation.

use crate::{KeystoneError, KeystoneResult};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `KeystoneError` on failure.
    fn validate_entity(&self) -> KeystoneResult<()> {
        self.validate().map_err(validation_errors_to_keystone_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `KeystoneError`.
#[must_use]
pub fn validation_errors_to_keystone_error(errors: ValidationErrors) -> KeystoneError {
    KeystoneError::Validation(errors.to_string())
}

/// Fails with [`KeystoneError::InvalidArgument`] when `value` is empty.
///
/// Runs before any I/O so a bad call never reaches the store.
pub fn ensure_not_empty(name: &str, value: &str) -> KeystoneResult<()> {
    if value.is_empty() {
        return Err(KeystoneError::InvalidArgument(format!("{} must not be empty", name)));
    }
    Ok(())
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}
