//! HTTP adapter for the wizard: the chat transport's entry point.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, MessageRequest, MessageResponse, ReplyResponse};
pub use handlers::WizardHandlers;
pub use routes::wizard_routes;
