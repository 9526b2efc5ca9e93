//! Control-plane API configuration

use reqwest::Url;
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::cloudflare::DEFAULT_API_BASE_URL;
use crate::application::DEFAULT_WORKER_NAME;

/// Control-plane API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ControlPlaneConfig {
    /// Base URL of the REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Name of the uploaded worker script
    #[serde(default = "default_worker_name")]
    pub worker_name: String,
}

impl ControlPlaneConfig {
    /// Validate control-plane configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        Url::parse(&self.api_base_url).map_err(|e| ValidationError::InvalidUrl {
            field: "control_plane.api_base_url",
            reason: e.to_string(),
        })?;
        if self.worker_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("control_plane.worker_name"));
        }
        Ok(())
    }
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            worker_name: default_worker_name(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_worker_name() -> String {
    DEFAULT_WORKER_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_plane_defaults() {
        let config = ControlPlaneConfig::default();
        assert_eq!(config.api_base_url, "https://api.cloudflare.com/client/v4");
        assert_eq!(config.worker_name, "managed-worker");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_bad_url() {
        let config = ControlPlaneConfig {
            api_base_url: "::nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_validation_blank_worker_name() {
        let config = ControlPlaneConfig {
            worker_name: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("control_plane.worker_name"))
        );
    }
}
