//! Application configuration structures.

use keystone_core::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Database connection configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Collection names.
    #[serde(default)]
    pub collections: CollectionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "keystone".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// MongoDB connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string (`mongodb://` or `mongodb+srv://`).
    pub uri: String,
    /// Database name.
    pub name: String,
    /// Application name reported to the server.
    pub app_name: Option<String>,
    /// Minimum connection pool size.
    pub min_pool_size: u32,
    /// Maximum connection pool size.
    pub max_pool_size: u32,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Server selection timeout in seconds.
    pub server_selection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/?replicaSet=rs0".to_string(),
            name: "keystone".to_string(),
            app_name: Some("keystone".to_string()),
            min_pool_size: 0,
            max_pool_size: 10,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the server selection timeout as a Duration.
    #[must_use]
    pub const fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }
}

/// Names of the collections the repositories read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub users: String,
    pub plans: String,
    pub news: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            users: "users".to_string(),
            plans: "plans".to_string(),
            news: "news".to_string(),
        }
    }
}
