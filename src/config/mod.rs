//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `EDGE_WIZARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use edge_wizard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod control_plane;
mod error;
mod server;
mod worker;

pub use control_plane::ControlPlaneConfig;
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use worker::WorkerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Control-plane API configuration
    #[serde(default)]
    pub control_plane: ControlPlaneConfig,

    /// Generated worker settings
    pub worker: WorkerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `EDGE_WIZARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `EDGE_WIZARD__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `EDGE_WIZARD__WORKER__VISIT_LOG_URL=...` -> `worker.visit_log_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EDGE_WIZARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.control_plane.validate()?;
        self.worker.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "EDGE_WIZARD__WORKER__VISIT_LOG_URL",
            "https://logs.example.org/visits",
        );
    }

    fn clear_env() {
        env::remove_var("EDGE_WIZARD__WORKER__VISIT_LOG_URL");
        env::remove_var("EDGE_WIZARD__SERVER__PORT");
        env::remove_var("EDGE_WIZARD__CONTROL_PLANE__WORKER_NAME");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.worker.visit_log_url, "https://logs.example.org/visits");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.control_plane.worker_name, "managed-worker");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_worker_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("EDGE_WIZARD__SERVER__PORT", "3000");
        env::set_var("EDGE_WIZARD__CONTROL_PLANE__WORKER_NAME", "geo-router");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.control_plane.worker_name, "geo-router");
    }
}
