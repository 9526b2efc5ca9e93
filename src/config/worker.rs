//! Generated worker configuration

use reqwest::Url;
use serde::Deserialize;

use super::error::ValidationError;

/// Settings baked into every generated worker
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Endpoint the worker posts one visit record to per evaluated request
    pub visit_log_url: String,
}

impl WorkerConfig {
    /// Validate worker configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.visit_log_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("worker.visit_log_url"));
        }
        Url::parse(&self.visit_log_url).map_err(|e| ValidationError::InvalidUrl {
            field: "worker.visit_log_url",
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
