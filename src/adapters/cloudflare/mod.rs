//! Control-plane adapters.
//!
//! - `CloudflareControlPlane` - REST client for the v4 API
//! - `MockControlPlane` - Configurable mock for tests

mod client;
mod mock;

pub use client::{CloudflareControlPlane, DEFAULT_API_BASE_URL};
pub use mock::{ControlPlaneCall, MockControlPlane};
