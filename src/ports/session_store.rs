//! Session Store Port - Per-operator wizard sessions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::OperatorId;
use crate::domain::wizard::Session;

/// Port for looking up an operator's session.
///
/// Each operator gets their own lock. Holding it serializes that operator's
/// messages without blocking anyone else.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the operator's session, creating a fresh one on first contact.
    async fn session(&self, operator: &OperatorId) -> Arc<Mutex<Session>>;

    /// Forgets the operator's session entirely.
    async fn remove(&self, operator: &OperatorId);
}
