//! HTTP DTOs for the wizard endpoint.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::wizard::Reply;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One inbound operator message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A reply with its optional keyboard rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Vec<Vec<String>>>,
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            text: reply.text,
            keyboard: reply.keyboard.map(|k| k.rows().to_vec()),
        }
    }
}

/// Replies to send back to the operator, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub replies: Vec<ReplyResponse>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::Reply;

    #[test]
    fn reply_response_flattens_keyboard() {
        let response: ReplyResponse = Reply::email_prompt().into();
        assert_eq!(
            response.keyboard,
            Some(vec![vec!["📋 New Project".to_string()]])
        );
    }

    #[test]
    fn message_request_deserializes() {
        let req: MessageRequest = serde_json::from_str(r#"{"text":"/start"}"#).unwrap();
        assert_eq!(req.text, "/start");
    }

    #[test]
    fn error_response_bad_request_creates_correctly() {
        let error = ErrorResponse::bad_request("Invalid input");
        assert_eq!(error.code, "BAD_REQUEST");
        assert_eq!(error.message, "Invalid input");
    }
}
