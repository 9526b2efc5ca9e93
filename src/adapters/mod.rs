//! Adapters - Implementations of ports for external systems.
//!
//! - `cloudflare` - Control-plane REST client and its mock
//! - `storage` - In-memory per-operator session store
//! - `http` - axum endpoint the chat transport delivers messages to

pub mod cloudflare;
pub mod http;
pub mod storage;
