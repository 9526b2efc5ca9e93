//! Mock control plane for testing.
//!
//! Returns queued responses per endpoint and records every call, so tests can
//! assert which calls were (or were not) issued.
//!
//! # Example
//!
//! ```ignore
//! let control_plane = MockControlPlane::succeeding("example.com")
//!     .with_route_response(ProviderResponse::new(409, "route already exists"));
//!
//! let result = deployer.deploy(&config, script).await;
//! assert_eq!(control_plane.call_count(), 3);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    ApiCredentials, ControlPlane, ControlPlaneError, ProviderResponse, RouteBinding, ScriptUpload,
};

/// A call recorded by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlPlaneCall {
    GetZone {
        email: String,
        zone_id: String,
    },
    PutScript {
        account_id: String,
        worker_name: String,
        main_module: String,
        source: String,
    },
    PostRoute {
        zone_id: String,
        binding: RouteBinding,
    },
}

type Outcome = Result<ProviderResponse, ControlPlaneError>;

/// Configurable in-memory control plane.
#[derive(Debug, Clone)]
pub struct MockControlPlane {
    zone: Arc<Mutex<VecDeque<Outcome>>>,
    script: Arc<Mutex<VecDeque<Outcome>>>,
    route: Arc<Mutex<VecDeque<Outcome>>>,
    default_domain: String,
    calls: Arc<Mutex<Vec<ControlPlaneCall>>>,
}

impl Default for MockControlPlane {
    fn default() -> Self {
        Self::succeeding("example.com")
    }
}

impl MockControlPlane {
    /// A control plane whose zone resolves to `domain` and where every call succeeds.
    pub fn succeeding(domain: impl Into<String>) -> Self {
        Self {
            zone: Arc::new(Mutex::new(VecDeque::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            route: Arc::new(Mutex::new(VecDeque::new())),
            default_domain: domain.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues the next zone lookup outcome.
    pub fn with_zone_response(self, response: ProviderResponse) -> Self {
        self.zone.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queues the next script upload outcome.
    pub fn with_script_response(self, response: ProviderResponse) -> Self {
        self.script.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queues the next route binding outcome.
    pub fn with_route_response(self, response: ProviderResponse) -> Self {
        self.route.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Makes the next zone lookup fail before any response arrives.
    pub fn with_zone_error(self, error: ControlPlaneError) -> Self {
        self.zone.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<ControlPlaneCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ControlPlaneCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn zone_ok(&self) -> ProviderResponse {
        let body = serde_json::json!({
            "success": true,
            "errors": [],
            "result": { "name": self.default_domain },
        });
        ProviderResponse::new(200, body.to_string())
    }
}

fn ok_envelope() -> ProviderResponse {
    ProviderResponse::new(200, r#"{"success":true,"errors":[],"result":{}}"#)
}

#[async_trait]
impl ControlPlane for MockControlPlane {
    async fn get_zone(
        &self,
        credentials: &ApiCredentials,
        zone_id: &str,
    ) -> Result<ProviderResponse, ControlPlaneError> {
        self.record(ControlPlaneCall::GetZone {
            email: credentials.email.clone(),
            zone_id: zone_id.to_string(),
        });
        let queued = self.zone.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(self.zone_ok()))
    }

    async fn put_script(
        &self,
        _credentials: &ApiCredentials,
        upload: &ScriptUpload,
    ) -> Result<ProviderResponse, ControlPlaneError> {
        self.record(ControlPlaneCall::PutScript {
            account_id: upload.account_id.clone(),
            worker_name: upload.worker_name.clone(),
            main_module: upload.main_module.clone(),
            source: upload.source.clone(),
        });
        let queued = self.script.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(ok_envelope()))
    }

    async fn post_route(
        &self,
        _credentials: &ApiCredentials,
        zone_id: &str,
        binding: &RouteBinding,
    ) -> Result<ProviderResponse, ControlPlaneError> {
        self.record(ControlPlaneCall::PostRoute {
            zone_id: zone_id.to_string(),
            binding: binding.clone(),
        });
        let queued = self.route.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(ok_envelope()))
    }
}
