//! Wizard handlers: message dispatch and worker deployment.

mod deploy_worker;
mod handle_message;

pub use deploy_worker::{DeployError, DeployWorkerHandler, DEFAULT_WORKER_NAME};
pub use handle_message::{HandleMessageCommand, HandleMessageHandler};
