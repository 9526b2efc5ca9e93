//! Outcome of one deployment attempt.

use serde::Serialize;

/// Success flag plus the resolved domain or a stage-prefixed error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentResult {
    pub success: bool,
    pub domain_or_error: String,
}

impl DeploymentResult {
    pub fn deployed(domain: impl Into<String>) -> Self {
        Self {
            success: true,
            domain_or_error: domain.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            domain_or_error: message.into(),
        }
    }

    /// Route pattern bound on success.
    pub fn route_pattern(&self) -> Option<String> {
        self.success.then(|| format!("{}/*", self.domain_or_error))
    }
}

impl<E: std::fmt::Display> From<Result<String, E>> for DeploymentResult {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(domain) => Self::deployed(domain),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}
