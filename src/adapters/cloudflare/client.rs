//! Cloudflare control-plane adapter.
//!
//! Implements the `ControlPlane` port over the v4 REST API using `reqwest`.
//! Every call authenticates with the account email and global API key
//! headers. Responses are returned raw; no retries or timeouts are applied.
//!
//! # Configuration
//!
//! ```ignore
//! let control_plane = CloudflareControlPlane::new("https://api.cloudflare.com/client/v4")?;
//! ```

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::ExposeSecret;

use crate::ports::{
    ApiCredentials, ControlPlane, ControlPlaneError, ProviderResponse, RouteBinding, ScriptUpload,
};

/// Default v4 API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";
const AUTH_KEY_HEADER: &str = "X-Auth-Key";
const MODULE_CONTENT_TYPE: &str = "application/javascript+module";

/// REST client for the control plane.
#[derive(Debug, Clone)]
pub struct CloudflareControlPlane {
    client: Client,
    base_url: Url,
}

impl CloudflareControlPlane {
    /// Creates a client rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ControlPlaneError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ControlPlaneError::InvalidRequest(format!("base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ControlPlaneError::InvalidRequest(format!(
                "base URL cannot carry a path: {}",
                base_url
            )));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| ControlPlaneError::Network(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ControlPlaneError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ControlPlaneError::InvalidRequest("base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authenticated(&self, request: RequestBuilder, credentials: &ApiCredentials) -> RequestBuilder {
        request
            .header(AUTH_EMAIL_HEADER, &credentials.email)
            .header(AUTH_KEY_HEADER, credentials.api_key.expose_secret())
    }

    async fn send(request: RequestBuilder) -> Result<ProviderResponse, ControlPlaneError> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ControlPlaneError::Network(format!("Connection failed: {}", e))
            } else {
                ControlPlaneError::Network(e.to_string())
            }
        })?;
        read_response(response).await
    }
}

async fn read_response(response: Response) -> Result<ProviderResponse, ControlPlaneError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ControlPlaneError::Network(format!("Failed to read response: {}", e)))?;
    Ok(ProviderResponse { status, body })
}

#[async_trait]
impl ControlPlane for CloudflareControlPlane {
    async fn get_zone(
        &self,
        credentials: &ApiCredentials,
        zone_id: &str,
    ) -> Result<ProviderResponse, ControlPlaneError> {
        let url = self.endpoint(&["zones", zone_id])?;
        tracing::debug!(%zone_id, "Fetching zone");
        Self::send(self.authenticated(self.client.get(url), credentials)).await
    }

    async fn put_script(
        &self,
        credentials: &ApiCredentials,
        upload: &ScriptUpload,
    ) -> Result<ProviderResponse, ControlPlaneError> {
        let url = self.endpoint(&[
            "accounts",
            &upload.account_id,
            "workers",
            "scripts",
            &upload.worker_name,
        ])?;

        let metadata = serde_json::json!({ "main_module": upload.main_module }).to_string();
        let metadata = Part::text(metadata)
            .mime_str("application/json")
            .map_err(|e| ControlPlaneError::InvalidRequest(e.to_string()))?;
        let script = Part::text(upload.source.clone())
            .file_name(upload.main_module.clone())
            .mime_str(MODULE_CONTENT_TYPE)
            .map_err(|e| ControlPlaneError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("metadata", metadata).part("script", script);

        tracing::debug!(
            account_id = %upload.account_id,
            worker = %upload.worker_name,
            bytes = upload.source.len(),
            "Uploading worker script"
        );
        Self::send(self.authenticated(self.client.put(url), credentials).multipart(form)).await
    }

    async fn post_route(
        &self,
        credentials: &ApiCredentials,
        zone_id: &str,
        binding: &RouteBinding,
    ) -> Result<ProviderResponse, ControlPlaneError> {
        let url = self.endpoint(&["zones", zone_id, "workers", "routes"])?;
        tracing::debug!(%zone_id, pattern = %binding.pattern, "Binding worker route");
        Self::send(self.authenticated(self.client.post(url), credentials).json(binding)).await
    }
}
