use async_trait::async_trait;
use reqwest::Client;
use shopsearch_common::{AppConfig, Result, ShopsearchError};
use tracing::debug;

use crate::embedder::Embedder;
use crate::types::{EmbeddingInput, EmbeddingRequest, EmbeddingResponse};

/// Embedding provider client (OpenAI-compatible REST API)
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    base_url: String,
    api_key: String,
    model: String,
    dimension: usize,
    client: Client,
}

impl HttpEmbedder {
    /// Create new embedding client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ShopsearchError::provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.embedding_base_url.trim_end_matches('/').to_string(),
            api_key: config.embedding_api_key.clone(),
            model: config.embedding_model.clone(),
            dimension: config.embedding_dimension,
            client,
        })
    }

    /// Normalize text before submission.
    ///
    /// Literal newline escape sequences confuse some providers; they are
    /// replaced with spaces.
    fn normalize(text: &str) -> String {
        text.replace("\\n", " ")
    }

    /// Single call against the provider's /embeddings endpoint
    async fn request_embeddings(&self, input: EmbeddingInput) -> Result<EmbeddingResponse> {
        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: self.model.clone(),
            input,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ShopsearchError::provider(format!("Failed to send embedding request: {}", e)))?
            .error_for_status()
            .map_err(|e| ShopsearchError::provider(format!("Embedding API error: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| ShopsearchError::provider(format!("Failed to parse embedding response: {}", e)))
    }

    /// Reject vectors whose dimension disagrees with configuration
    fn check_dimension(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.dimension {
            return Err(ShopsearchError::provider(format!(
                "Embedding dimension mismatch: expected {}, got {}",
                self.dimension,
                embedding.len()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = Self::normalize(text);
        debug!("Generating embedding - Model: {}, Text length: {}", self.model, input.len());

        let mut response = self
            .request_embeddings(EmbeddingInput::Single(input))
            .await?;

        if response.data.len() != 1 {
            return Err(ShopsearchError::provider(format!(
                "Expected 1 embedding, got {}",
                response.data.len()
            )));
        }

        let embedding = response.data.remove(0).embedding;
        self.check_dimension(&embedding)?;

        debug!("Received embedding - Dimension: {}", embedding.len());
        Ok(embedding)
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating batch embeddings - Model: {}, Count: {}", self.model, texts.len());

        let batch: Vec<String> = texts.iter().map(|t| Self::normalize(t)).collect();
        let response = self
            .request_embeddings(EmbeddingInput::Batch(batch))
            .await?;

        if response.data.len() != texts.len() {
            return Err(ShopsearchError::provider(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                response.data.len()
            )));
        }

        // Restore input order from the provider's index field
        let mut embeddings: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        for entry in response.data {
            self.check_dimension(&entry.embedding)?;
            let slot = embeddings.get_mut(entry.index).ok_or_else(|| {
                ShopsearchError::provider(format!("Embedding index {} out of range", entry.index))
            })?;
            *slot = Some(entry.embedding);
        }

        embeddings
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                e.ok_or_else(|| {
                    ShopsearchError::provider(format!("Missing embedding for input {}", i))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String, dimension: usize) -> AppConfig {
        AppConfig {
            embedding_base_url: base_url,
            embedding_api_key: "test-key".to_string(),
            embedding_model: "test-embedding".to_string(),
            embedding_dimension: dimension,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_normalize_literal_escapes() {
        assert_eq!(HttpEmbedder::normalize("red\\nshoes"), "red shoes");
        assert_eq!(HttpEmbedder::normalize("no escapes"), "no escapes");
    }

    #[tokio::test]
    async fn test_embed_returns_vector() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-embedding",
                "input": "red shoes"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [1.0, 0.0, 0.0], "index": 0}],
                "model": "test-embedding"
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_config(server.uri(), 3)).unwrap();
        let embedding = embedder.embed("red\\nshoes").await.unwrap();
        assert_eq!(embedding, vec![1.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_embed_rejects_wrong_dimension() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [1.0, 0.0], "index": 0}],
                "model": "test-embedding"
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_config(server.uri(), 3)).unwrap();
        let err = embedder.embed("query").await.unwrap_err();
        assert!(matches!(err, ShopsearchError::Provider(_)));
    }

    #[tokio::test]
    async fn test_embed_surfaces_api_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_config(server.uri(), 3)).unwrap();
        let err = embedder.embed("query").await.unwrap_err();
        assert!(matches!(err, ShopsearchError::Provider(_)));
    }

    #[tokio::test]
    async fn test_embed_many_restores_input_order() {
        let server = MockServer::start().await;

        // Entries arrive out of order; the index field is authoritative
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"embedding": [0.0, 1.0], "index": 1},
                    {"embedding": [1.0, 0.0], "index": 0}
                ],
                "model": "test-embedding"
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_config(server.uri(), 2)).unwrap();
        let embeddings = embedder
            .embed_many(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        assert_eq!(embeddings, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_embed_many_is_atomic_on_short_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [1.0, 0.0], "index": 0}],
                "model": "test-embedding"
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_config(server.uri(), 2)).unwrap();
        let result = embedder
            .embed_many(&["first".to_string(), "second".to_string()])
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_embed_many_empty_input_makes_no_call() {
        // No mock server at all: any HTTP call would fail
        let embedder =
            HttpEmbedder::new(&test_config("http://127.0.0.1:1".to_string(), 2)).unwrap();
        let embeddings = embedder.embed_many(&[]).await.unwrap();
        assert!(embeddings.is_empty());
    }
}
