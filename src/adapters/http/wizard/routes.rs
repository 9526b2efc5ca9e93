//! HTTP routes for the wizard endpoint.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, post_message, WizardHandlers};

/// Creates the wizard router with all endpoints.
pub fn wizard_routes(handlers: WizardHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/operators/:operator_id/messages", post(post_message))
        .with_state(handlers)
        .layer(TraceLayer::new_for_http())
}
