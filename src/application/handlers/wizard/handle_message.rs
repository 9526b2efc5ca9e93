//! HandleMessageHandler - Applies one operator message to their wizard.

use std::sync::Arc;

use crate::domain::foundation::{OperatorId, ValidationError};
use crate::domain::wizard::{Advance, Reply};
use crate::domain::worker::{render_worker, RoutingRule};
use crate::ports::SessionStore;

use super::deploy_worker::DeployWorkerHandler;

/// Command carrying one inbound chat message.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    pub operator_id: OperatorId,
    pub text: String,
}

/// Handler for inbound operator messages.
pub struct HandleMessageHandler {
    sessions: Arc<dyn SessionStore>,
    deployer: Arc<DeployWorkerHandler>,
    visit_log_url: String,
}

impl HandleMessageHandler {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        deployer: Arc<DeployWorkerHandler>,
        visit_log_url: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            deployer,
            visit_log_url: visit_log_url.into(),
        }
    }

    /// Advances the operator's session and returns the replies to send.
    ///
    /// The operator's session lock is held until the replies are ready,
    /// deployment included, so their next message waits for this one.
    pub async fn handle(&self, cmd: HandleMessageCommand) -> Result<Vec<Reply>, ValidationError> {
        let session = self.sessions.session(&cmd.operator_id).await;
        let mut session = session.lock().await;

        let advance = match session.advance(&cmd.text) {
            Ok(advance) => advance,
            Err(e) => {
                tracing::error!(operator = %cmd.operator_id, error = %e, "Wizard transition failed");
                session.reset();
                return Err(e);
            }
        };

        let config = match advance {
            Advance::Reply(reply) => {
                tracing::debug!(operator = %cmd.operator_id, step = ?session.step(), "Wizard advanced");
                return Ok(vec![reply]);
            }
            Advance::Deploy(config) => config,
        };

        tracing::info!(
            operator = %cmd.operator_id,
            cloak_type = %config.targeting.cloak_type(),
            geo = %config.geo,
            "Starting worker deployment"
        );
        let started = Reply::deployment_started(&config.geo);

        let rule = RoutingRule::from_config(&config, &self.visit_log_url);
        let script = render_worker(&rule);
        let result = self.deployer.deploy(&config, &script).await;

        let report = if result.success {
            Reply::deployed(
                config.targeting.cloak_type(),
                &config.geo,
                config.targeting.devices(),
                &result.domain_or_error,
            )
        } else {
            Reply::deployment_failed(&result.domain_or_error)
        };

        Ok(vec![started, report])
    }
}
