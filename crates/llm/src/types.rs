use serde::{Deserialize, Serialize};

/// Embedding request (OpenAI-compatible wire format)
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    /// Model name (e.g., "text-embedding-3-small")
    pub model: String,

    /// Input text(s)
    pub input: EmbeddingInput,
}

/// Embedding input: a single text or a batch
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

/// Embedding response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    /// One entry per input
    pub data: Vec<EmbeddingData>,

    /// Model that produced the embeddings
    pub model: String,

    /// Token usage, if the provider reports it
    #[serde(default)]
    pub usage: Option<EmbeddingUsage>,
}

/// Single embedding entry
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    /// The embedding vector
    pub embedding: Vec<f32>,

    /// Position of the corresponding input in the request
    pub index: usize,
}

/// Token usage report
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name
    pub model: String,

    /// Conversation turns, system instruction first
    pub messages: Vec<ChatMessage>,

    /// Enable token streaming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedding_input_serialization() {
        let single = serde_json::to_value(EmbeddingInput::Single("red shoes".to_string())).unwrap();
        assert_eq!(single, serde_json::json!("red shoes"));

        let batch =
            serde_json::to_value(EmbeddingInput::Batch(vec!["a".to_string(), "b".to_string()]))
                .unwrap();
        assert_eq!(batch, serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_chat_request_skips_absent_stream() {
        let request = ChatRequest {
            model: "gpt-5-mini".to_string(),
            messages: vec![ChatMessage::user("hello")],
            stream: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("stream").is_none());
    }

    #[test]
    fn test_embedding_response_deserialization() {
        let raw = serde_json::json!({
            "data": [{"embedding": [0.1, 0.2], "index": 0}],
            "model": "text-embedding-3-small"
        });

        let response: EmbeddingResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].embedding, vec![0.1, 0.2]);
        assert!(response.usage.is_none());
    }
}
