//! Control Plane Port - Interface for the edge platform's REST API.
//!
//! The port is deliberately thin: it performs the three calls the deployment
//! needs and hands back the raw status and body. Deciding what counts as
//! success (status codes, error envelopes, the "already exists" route
//! conflict) belongs to the deployment pipeline.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;

/// Credentials sent with every control-plane call.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub email: String,
    pub api_key: SecretString,
}

/// Script upload: module source plus the metadata naming its entry file.
#[derive(Debug, Clone)]
pub struct ScriptUpload {
    pub account_id: String,
    pub worker_name: String,
    pub main_module: String,
    pub source: String,
}

/// Route binding request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteBinding {
    pub pattern: String,
    pub script: String,
}

/// Raw HTTP outcome of a control-plane call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 200 or 201.
    pub fn is_created_or_ok(&self) -> bool {
        matches!(self.status, 200 | 201)
    }
}

/// Errors that prevent a response from being received at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlPlaneError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Port for the edge platform's control plane.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// `GET /zones/{zone_id}`
    async fn get_zone(
        &self,
        credentials: &ApiCredentials,
        zone_id: &str,
    ) -> Result<ProviderResponse, ControlPlaneError>;

    /// `PUT /accounts/{account_id}/workers/scripts/{worker_name}`
    async fn put_script(
        &self,
        credentials: &ApiCredentials,
        upload: &ScriptUpload,
    ) -> Result<ProviderResponse, ControlPlaneError>;

    /// `POST /zones/{zone_id}/workers/routes`
    async fn post_route(
        &self,
        credentials: &ApiCredentials,
        zone_id: &str,
        binding: &RouteBinding,
    ) -> Result<ProviderResponse, ControlPlaneError>;
}
