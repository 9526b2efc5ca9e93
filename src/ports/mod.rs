//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ControlPlane` - the edge platform's REST API (zones, scripts, routes)
//! - `SessionStore` - per-operator wizard sessions

mod control_plane;
mod session_store;

pub use control_plane::{
    ApiCredentials, ControlPlane, ControlPlaneError, ProviderResponse, RouteBinding, ScriptUpload,
};
pub use session_store::SessionStore;
