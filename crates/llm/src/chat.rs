use bytes::Bytes;
use futures::Stream;
use reqwest::Client;
use shopsearch_common::{AppConfig, Result, ShopsearchError};
use tracing::debug;

use crate::types::{ChatMessage, ChatRequest};

/// Chat completion client (OpenAI-compatible REST API)
///
/// Opens a streamed completion and hands the raw byte stream back to the
/// caller; the token stream is relayed, never parsed here.
#[derive(Debug, Clone)]
pub struct ChatClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl ChatClient {
    /// Create new chat client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        // The timeout bounds the entire completion stream, not just the
        // connection handshake.
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ShopsearchError::chat(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.embedding_base_url.trim_end_matches('/').to_string(),
            api_key: config.embedding_api_key.clone(),
            model: config.chat_model.clone(),
            client,
        })
    }

    /// Open a streamed chat completion
    ///
    /// `system` is prepended to the conversation turns as the system
    /// instruction.
    pub async fn stream(
        &self,
        system: &str,
        history: Vec<ChatMessage>,
    ) -> Result<impl Stream<Item = reqwest::Result<Bytes>>> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(system));
        messages.extend(history);

        debug!(
            "Opening completion stream - Model: {}, Turns: {}",
            self.model,
            messages.len()
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: Some(true),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ShopsearchError::chat(format!("Failed to open completion stream: {}", e)))?
            .error_for_status()
            .map_err(|e| ShopsearchError::chat(format!("Chat API error: {}", e)))?;

        Ok(response.bytes_stream())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> AppConfig {
        AppConfig {
            embedding_base_url: base_url,
            embedding_api_key: "test-key".to_string(),
            chat_model: "test-chat".to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_stream_relays_bytes_verbatim() {
        let server = MockServer::start().await;
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\n\ndata: [DONE]\n\n";

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-chat",
                "stream": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = ChatClient::new(&test_config(server.uri())).unwrap();
        let mut stream = Box::pin(
            client
                .stream("be helpful", vec![ChatMessage::user("hello")])
                .await
                .unwrap(),
        );

        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }

        assert_eq!(collected, body.as_bytes());
    }

    #[tokio::test]
    async fn test_stream_surfaces_api_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = ChatClient::new(&test_config(server.uri())).unwrap();
        let err = client.stream("sys", vec![]).await.err().unwrap();
        assert!(matches!(err, ShopsearchError::Chat(_)));
    }
}
