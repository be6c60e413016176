use serde::de::DeserializeOwned;
use shopsearch_common::{AppConfig, Result};
use shopsearch_llm::{ChatClient, Embedder, HttpEmbedder};
use shopsearch_retrieval::{Catalog, EmbeddedRecord, MaterialRetrieval, ProductRetrieval};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Product retrieval service
    pub products: ProductRetrieval,

    /// Material retrieval service
    pub materials: MaterialRetrieval,

    /// Chat completion client
    pub chat: ChatClient,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(&config)?);
        let chat = ChatClient::new(&config)?;

        let product_catalog = Arc::new(Self::load_catalog(
            &config.product_catalog_path(),
            config.embedding_dimension,
        ));
        let material_catalog = Arc::new(Self::load_catalog(
            &config.material_catalog_path(),
            config.embedding_dimension,
        ));

        Ok(Self {
            products: ProductRetrieval::new(embedder.clone(), product_catalog),
            materials: MaterialRetrieval::new(embedder, material_catalog),
            chat,
            config,
        })
    }

    /// Load a catalog file, falling back to an empty catalog.
    ///
    /// A missing or unreadable catalog is not fatal: searches over an
    /// empty catalog are valid empty successes.
    fn load_catalog<R>(path: &Path, dimension: usize) -> Catalog<R>
    where
        R: EmbeddedRecord + DeserializeOwned,
    {
        if !path.exists() {
            warn!("Catalog file {} not found, starting empty", path.display());
            return Catalog::empty(dimension);
        }

        match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(
                    "Failed to load catalog {}: {}, starting empty",
                    path.display(),
                    e
                );
                Catalog::empty(dimension)
            }
        }
    }
}
