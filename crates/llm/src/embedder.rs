use async_trait::async_trait;
use shopsearch_common::Result;

/// Text embedding capability
///
/// Implementations turn text into a fixed-dimension vector. Callers own
/// retry policy; implementations make exactly one provider call per method.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving input order.
    ///
    /// Fails atomically: a failed batch returns no partial list.
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
