use shopsearch_common::Result;
use shopsearch_llm::Embedder;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::engine::{search, SearchPolicy};
use crate::types::{Material, MaterialMatch, Product, ProductMatch};

/// Product ranking: confidence floor at 0.5, top 4
pub const PRODUCT_POLICY: SearchPolicy = SearchPolicy {
    min_similarity: Some(0.5),
    limit: 4,
};

/// Material ranking: no floor, top 3.
///
/// The matcher must always surface a best-available record even under
/// imperfect confidence, so materials are never threshold-filtered.
pub const MATERIAL_POLICY: SearchPolicy = SearchPolicy {
    min_similarity: None,
    limit: 3,
};

/// Semantic retrieval over the product catalog
pub struct ProductRetrieval {
    embedder: Arc<dyn Embedder>,
    catalog: Arc<Catalog<Product>>,
}

impl ProductRetrieval {
    pub fn new(embedder: Arc<dyn Embedder>, catalog: Arc<Catalog<Product>>) -> Self {
        Self { embedder, catalog }
    }

    /// Retrieve the products most similar to a free-text query
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ProductMatch>> {
        if query.trim().is_empty() {
            // Blank queries never reach the provider
            debug!("Blank product query, skipping retrieval");
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await?;
        search(&self.catalog, &vector, PRODUCT_POLICY, |p, similarity| {
            ProductMatch {
                id: p.id,
                name: p.title.clone(),
                price: p.price,
                description: p.description.clone(),
                image_url: p.image_url.clone(),
                similarity,
            }
        })
    }
}

/// Semantic retrieval over the material catalog
pub struct MaterialRetrieval {
    embedder: Arc<dyn Embedder>,
    catalog: Arc<Catalog<Material>>,
}

impl MaterialRetrieval {
    pub fn new(embedder: Arc<dyn Embedder>, catalog: Arc<Catalog<Material>>) -> Self {
        Self { embedder, catalog }
    }

    /// Retrieve the materials most similar to a free-text query
    pub async fn retrieve(&self, query: &str) -> Result<Vec<MaterialMatch>> {
        if query.trim().is_empty() {
            debug!("Blank material query, skipping retrieval");
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await?;
        search(&self.catalog, &vector, MATERIAL_POLICY, |m, similarity| {
            MaterialMatch {
                id: m.id,
                ea_number: m.ea_number.clone(),
                name: m.name.clone(),
                description: m.description.clone(),
                time_estimation: m.time_estimation,
                specs: m.specs.clone(),
                similarity,
            }
        })
    }
}
