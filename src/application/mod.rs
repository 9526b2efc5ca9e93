//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    DeployError, DeployWorkerHandler, HandleMessageCommand, HandleMessageHandler,
    DEFAULT_WORKER_NAME,
};
