//! HTTP handlers for the wizard endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{HandleMessageCommand, HandleMessageHandler};
use crate::domain::foundation::OperatorId;

use super::dto::{ErrorResponse, MessageRequest, MessageResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WizardHandlers {
    message_handler: Arc<HandleMessageHandler>,
}

impl WizardHandlers {
    pub fn new(message_handler: Arc<HandleMessageHandler>) -> Self {
        Self { message_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /operators/:operator_id/messages - Deliver one operator message
pub async fn post_message(
    State(handlers): State<WizardHandlers>,
    Path(operator_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Response {
    let operator_id = match operator_id.parse::<OperatorId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid operator ID")),
            )
                .into_response()
        }
    };

    let cmd = HandleMessageCommand {
        operator_id,
        text: req.text,
    };

    match handlers.message_handler.handle(cmd).await {
        Ok(replies) => {
            let response = MessageResponse {
                replies: replies.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
            .into_response(),
    }
}

/// GET /health - Liveness check
pub async fn health() -> &'static str {
    "ok"
}
