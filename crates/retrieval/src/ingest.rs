use chrono::Utc;
use serde::Deserialize;
use shopsearch_common::{AppConfig, Result};
use shopsearch_llm::Embedder;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::catalog::CatalogFile;
use crate::types::{Material, Product};

/// Raw product record as found in the source JSON document
#[derive(Debug, Clone, Deserialize)]
pub struct SourceProduct {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Product source document
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSeedFile {
    pub products: Vec<SourceProduct>,
}

/// Raw material record as found in the source JSON document
#[derive(Debug, Clone, Deserialize)]
pub struct SourceMaterial {
    pub id: i64,
    pub ea_number: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub specs: serde_json::Value,
    pub time_estimation: f64,
    pub price: f64,
}

/// Material source document
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialSeedFile {
    pub database_materials: Vec<SourceMaterial>,
}

/// Offline catalog builder.
///
/// Reads raw source records, builds each record's descriptive text blob,
/// batch-embeds the blobs and writes the catalog file the server loads.
/// A failed batch embeds nothing and writes nothing.
pub struct Ingestor {
    embedder: Arc<dyn Embedder>,
    model: String,
    dimension: usize,
}

impl Ingestor {
    pub fn new(embedder: Arc<dyn Embedder>, config: &AppConfig) -> Self {
        Self {
            embedder,
            model: config.embedding_model.clone(),
            dimension: config.embedding_dimension,
        }
    }

    /// Build the product catalog from a source document
    pub async fn seed_products(&self, source: &Path, output: &Path) -> Result<usize> {
        let raw = std::fs::read_to_string(source)?;
        let seed: ProductSeedFile = serde_json::from_str(&raw)?;
        info!("Found {} products, generating embeddings", seed.products.len());

        let contents: Vec<String> = seed.products.iter().map(product_content).collect();
        let blobs: Vec<String> = contents.iter().map(|c| flatten(c)).collect();
        let embeddings = self.embedder.embed_many(&blobs).await?;

        let records: Vec<Product> = seed
            .products
            .into_iter()
            .zip(contents)
            .zip(embeddings)
            .map(|((p, content), embedding)| Product {
                id: p.id,
                title: p.title,
                description: p.description,
                price: p.price,
                category: p.category,
                brand: p.brand,
                image_url: p.thumbnail,
                content,
                embedding: Some(embedding),
            })
            .collect();

        self.write_catalog(output, records)
    }

    /// Build the material catalog from a source document
    pub async fn seed_materials(&self, source: &Path, output: &Path) -> Result<usize> {
        let raw = std::fs::read_to_string(source)?;
        let seed: MaterialSeedFile = serde_json::from_str(&raw)?;
        info!(
            "Found {} materials, generating embeddings",
            seed.database_materials.len()
        );

        let blobs: Vec<String> = seed
            .database_materials
            .iter()
            .map(|m| flatten(&material_content(m)))
            .collect();
        let embeddings = self.embedder.embed_many(&blobs).await?;

        let records: Vec<Material> = seed
            .database_materials
            .into_iter()
            .zip(embeddings)
            .map(|(m, embedding)| Material {
                id: m.id,
                ea_number: m.ea_number,
                name: m.name,
                description: m.description,
                category: m.category,
                specs: m.specs,
                time_estimation: m.time_estimation,
                price: m.price,
                embedding: Some(embedding),
            })
            .collect();

        self.write_catalog(output, records)
    }

    fn write_catalog<R: serde::Serialize>(&self, output: &Path, records: Vec<R>) -> Result<usize> {
        let count = records.len();
        let file = CatalogFile {
            model: self.model.clone(),
            dimension: self.dimension,
            generated_at: Utc::now(),
            records,
        };

        let data = serde_json::to_string_pretty(&file)?;
        std::fs::write(output, data)?;
        info!("Catalog written to {} - {} records", output.display(), count);

        Ok(count)
    }
}

/// Descriptive text blob for a product, the text that gets embedded
fn product_content(p: &SourceProduct) -> String {
    format!(
        "Product: {}\nBrand: {}\nCategory: {}\nDescription: {}\nPrice: ${}",
        p.title,
        p.brand.as_deref().unwrap_or_default(),
        p.category,
        p.description,
        p.price
    )
}

/// Descriptive text blob for a material.
///
/// Name, description and spec keys/values are combined on purpose; spec
/// values carry most of the matching signal for electrical materials.
fn material_content(m: &SourceMaterial) -> String {
    format!(
        "Material: {}\nDescription: {}\nCategory: {}\nSpecs: {}",
        m.name,
        m.description,
        m.category,
        specs_string(&m.specs)
    )
}

/// Render an open attribute map as "key: value, key: value"
fn specs_string(specs: &serde_json::Value) -> String {
    match specs.as_object() {
        Some(map) => map
            .iter()
            .map(|(k, v)| match v.as_str() {
                Some(s) => format!("{}: {}", k, s),
                None => format!("{}: {}", k, v),
            })
            .collect::<Vec<_>>()
            .join(", "),
        None => specs.to_string(),
    }
}

/// Replace real newlines with spaces before embedding
fn flatten(text: &str) -> String {
    text.replace('\n', " ")
}
