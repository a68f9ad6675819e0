//! Configuration validation module.
//!
//! Fails fast on invalid configuration rather than at the first query.

use crate::{AppConfig, CollectionConfig, DatabaseConfig};
use mongodb::options::ConnectionString;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Connection string is missing or malformed.
    InvalidUri { message: String },
    /// A required name is empty.
    EmptyName { field: String },
    /// Two collections share a name.
    DuplicateCollection { name: String },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUri { message } => write!(f, "Invalid database URI: {}", message),
            Self::EmptyName { field } => write!(f, "'{}' cannot be empty", field),
            Self::DuplicateCollection { name } => {
                write!(f, "Collection '{}' is configured more than once", name)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::NonPositiveTimeout { name } => write!(f, "Timeout '{}' must be positive", name),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_database(&config.database, &mut errors);
        Self::validate_collections(&config.collections, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.uri.is_empty() {
            errors.push(ConfigValidationError::InvalidUri {
                message: "URI cannot be empty".to_string(),
            });
        } else if let Err(e) = ConnectionString::parse(&config.uri) {
            errors.push(ConfigValidationError::InvalidUri {
                message: e.to_string(),
            });
        }

        if config.name.is_empty() {
            errors.push(ConfigValidationError::EmptyName {
                field: "database.name".to_string(),
            });
        }

        if config.min_pool_size > config.max_pool_size {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_pool_size,
                max: config.max_pool_size,
            });
        }
        if config.max_pool_size > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
            });
        }
        if config.server_selection_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.server_selection_timeout_secs".to_string(),
            });
        }
    }

    fn validate_collections(config: &CollectionConfig, errors: &mut Vec<ConfigValidationError>) {
        let named = [
            ("collections.users", &config.users),
            ("collections.plans", &config.plans),
            ("collections.news", &config.news),
        ];

        for (field, name) in named {
            if name.is_empty() {
                errors.push(ConfigValidationError::EmptyName {
                    field: field.to_string(),
                });
            }
        }

        for (i, (_, name)) in named.iter().enumerate() {
            let repeated = named[..i].iter().any(|(_, other)| other == name);
            if !name.is_empty() && repeated {
                errors.push(ConfigValidationError::DuplicateCollection {
                    name: (*name).clone(),
                });
            }
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
