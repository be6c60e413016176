use serde::{Deserialize, Serialize};
use shopsearch_llm::ChatMessage;

/// Search request body
///
/// The query field is kept as a raw value so the handlers can reject a
/// missing or non-string query with the boundary's error contract
/// instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<serde_json::Value>,
}

impl SearchRequest {
    /// The query string, if present and actually a string
    pub fn query_str(&self) -> Option<&str> {
        self.query.as_ref().and_then(|v| v.as_str())
    }
}

/// Search response body
#[derive(Debug, Serialize)]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Chat request body: the full conversation so far
#[derive(Debug, Deserialize)]
pub struct ChatTurnRequest {
    pub messages: Vec<UiMessage>,
}

/// One UI conversation turn, carrying typed parts
#[derive(Debug, Clone, Deserialize)]
pub struct UiMessage {
    pub role: String,

    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// One part of a UI message
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub text: Option<String>,
}

impl UiMessage {
    /// The turn's text: all text parts joined by spaces
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter(|p| p.kind == "text")
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flatten to a provider chat message
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role.clone(),
            content: self.text(),
        }
    }
}
