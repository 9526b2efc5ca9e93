//! In-Memory Session Store Adapter
//!
//! Keeps each operator's wizard session in process memory. Sessions vanish on
//! restart, which matches the wizard's ephemeral lifecycle.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::OperatorId;
use crate::domain::wizard::Session;
use crate::ports::SessionStore;

/// In-memory map from operator to their own session lock.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<OperatorId, Arc<Mutex<Session>>>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of tracked operators
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn session(&self, operator: &OperatorId) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(operator) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(operator.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new()))),
        )
    }

    async fn remove(&self, operator: &OperatorId) {
        self.sessions.write().await.remove(operator);
    }
}
