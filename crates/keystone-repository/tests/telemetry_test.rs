//! Logging initialisation as an embedding application performs it.
//!
//! Kept in its own test binary because it installs the global subscriber.

use keystone_config::AppConfig;
use keystone_core::{init_telemetry, LogFormat};

#[test]
fn test_init_from_app_config() {
    let mut config = AppConfig::default();
    config.logging.log_format = LogFormat::Json;
    config.logging.log_level = "debug".to_string();

    init_telemetry(&config.logging).expect("Failed to install subscriber");
    assert!(tracing::dispatcher::has_been_set());
    tracing::debug!(service = %config.logging.service_name, "subscriber installed");

    assert!(init_telemetry(&config.logging).is_err());
}
