//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};

use crate::chat::{Reply, ReplyKind};

/// A user message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// The single reply to a message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub kind: ReplyKind,
    /// Reply text; Markdown for schedule listings.
    pub reply: String,
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        Self {
            kind: reply.kind(),
            reply: reply.text().to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
