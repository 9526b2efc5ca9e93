//! DeployWorkerHandler - Publishes a rendered worker to the control plane.
//!
//! Three calls, strictly in order, stopping at the first failure:
//! resolve the zone to its domain, upload the script, bind `<domain>/*`
//! to the script. Earlier steps are never rolled back.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::wizard::DeploymentConfig;
use crate::domain::worker::{DeploymentResult, MAIN_MODULE};
use crate::ports::{ApiCredentials, ControlPlane, ProviderResponse, RouteBinding, ScriptUpload};

/// Default name of the uploaded script resource.
pub const DEFAULT_WORKER_NAME: &str = "managed-worker";

const DEFAULT_ZONE_ERROR: &str = "Invalid Zone";
const DEFAULT_SCRIPT_ERROR: &str = "Upload Error";
const DEFAULT_ROUTE_ERROR: &str = "Route Error";

/// Substring of a route conflict response that means the binding is already in place.
///
/// The provider reports this as an error envelope, not a distinct status
/// code, so this relies on the wording of its message.
const ROUTE_ALREADY_EXISTS: &str = "already exists";

/// Failure of one deployment stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    #[error("Zone Error: {0}")]
    Zone(String),

    #[error("Script Error: {0}")]
    Script(String),

    #[error("Route Error: {0}")]
    Route(String),
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<ZoneResult>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZoneResult {
    name: Option<String>,
}

impl Envelope {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn first_error(&self) -> Option<String> {
        self.errors.first().and_then(|e| e.message.clone())
    }
}

fn provider_message(response: &ProviderResponse, default: &str) -> String {
    Envelope::parse(&response.body)
        .first_error()
        .unwrap_or_else(|| default.to_string())
}

/// Handler for publishing workers.
pub struct DeployWorkerHandler {
    control_plane: Arc<dyn ControlPlane>,
    worker_name: String,
}

impl DeployWorkerHandler {
    pub fn new(control_plane: Arc<dyn ControlPlane>, worker_name: impl Into<String>) -> Self {
        Self {
            control_plane,
            worker_name: worker_name.into(),
        }
    }

    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }

    /// Runs the three deployment calls and reports the outcome.
    pub async fn deploy(&self, config: &DeploymentConfig, script: &str) -> DeploymentResult {
        let result = self.run(config, script).await;
        match &result {
            Ok(domain) => tracing::info!(
                %domain,
                worker = %self.worker_name,
                cloak_type = %config.targeting.cloak_type(),
                "Worker deployed"
            ),
            Err(e) => tracing::warn!(error = %e, zone_id = %config.zone_id, "Worker deployment failed"),
        }
        result.into()
    }

    async fn run(&self, config: &DeploymentConfig, script: &str) -> Result<String, DeployError> {
        let credentials = ApiCredentials {
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        };

        // 1. Resolve zone
        let domain = self.resolve_zone(&credentials, &config.zone_id).await?;

        // 2. Upload script
        let upload = ScriptUpload {
            account_id: config.account_id.clone(),
            worker_name: self.worker_name.clone(),
            main_module: MAIN_MODULE.to_string(),
            source: script.to_string(),
        };
        let response = self
            .control_plane
            .put_script(&credentials, &upload)
            .await
            .map_err(|e| DeployError::Script(e.to_string()))?;
        if !response.is_created_or_ok() {
            return Err(DeployError::Script(provider_message(
                &response,
                DEFAULT_SCRIPT_ERROR,
            )));
        }

        // 3. Bind route
        let binding = RouteBinding {
            pattern: format!("{}/*", domain),
            script: self.worker_name.clone(),
        };
        let response = self
            .control_plane
            .post_route(&credentials, &config.zone_id, &binding)
            .await
            .map_err(|e| DeployError::Route(e.to_string()))?;
        if !response.is_created_or_ok() {
            if response.body.contains(ROUTE_ALREADY_EXISTS) {
                tracing::debug!(pattern = %binding.pattern, "Route already bound");
            } else {
                return Err(DeployError::Route(provider_message(
                    &response,
                    DEFAULT_ROUTE_ERROR,
                )));
            }
        }

        Ok(domain)
    }

    async fn resolve_zone(
        &self,
        credentials: &ApiCredentials,
        zone_id: &str,
    ) -> Result<String, DeployError> {
        let response = self
            .control_plane
            .get_zone(credentials, zone_id)
            .await
            .map_err(|e| DeployError::Zone(e.to_string()))?;

        let envelope = Envelope::parse(&response.body);
        if !response.is_success() {
            return Err(DeployError::Zone(
                envelope
                    .first_error()
                    .unwrap_or_else(|| DEFAULT_ZONE_ERROR.to_string()),
            ));
        }

        envelope
            .result
            .and_then(|r| r.name)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DeployError::Zone(DEFAULT_ZONE_ERROR.to_string()))
    }
}
