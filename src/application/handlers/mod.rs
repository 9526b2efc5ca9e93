//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod wizard;

pub use wizard::{
    DeployError, DeployWorkerHandler, HandleMessageCommand, HandleMessageHandler,
    DEFAULT_WORKER_NAME,
};
