use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shopsearch_common::{Result, ShopsearchError};
use std::path::Path;
use tracing::info;

use crate::types::EmbeddedRecord;

/// On-disk catalog layout: header plus records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile<R> {
    /// Embedding model the stored vectors were computed with
    pub model: String,

    /// Embedding dimension
    pub dimension: usize,

    /// When the catalog was generated
    pub generated_at: DateTime<Utc>,

    /// Item records
    pub records: Vec<R>,
}

/// Immutable in-memory collection of one record variant.
///
/// Loaded once at startup and shared read-only; the online path never
/// mutates records.
#[derive(Debug)]
pub struct Catalog<R> {
    records: Vec<R>,
    dimension: usize,
}

impl<R: EmbeddedRecord> Catalog<R> {
    /// Create an empty catalog with the given dimension
    pub fn empty(dimension: usize) -> Self {
        Self {
            records: Vec::new(),
            dimension,
        }
    }

    /// Build a catalog, validating stored embedding dimensions
    pub fn from_records(records: Vec<R>, dimension: usize) -> Result<Self> {
        for record in &records {
            if let Some(embedding) = record.embedding() {
                if embedding.len() != dimension {
                    return Err(ShopsearchError::query(format!(
                        "Stored embedding dimension mismatch for record {}: expected {}, got {}",
                        record.id(),
                        dimension,
                        embedding.len()
                    )));
                }
            }
        }

        Ok(Self { records, dimension })
    }

    /// Load a catalog from its JSON file
    pub fn load(path: &Path) -> Result<Self>
    where
        R: DeserializeOwned,
    {
        let data = std::fs::read_to_string(path)?;
        let file: CatalogFile<R> = serde_json::from_str(&data)?;

        let catalog = Self::from_records(file.records, file.dimension)?;
        info!(
            "Catalog loaded from {} - {} records, dimension {}",
            path.display(),
            catalog.len(),
            catalog.dimension()
        );

        Ok(catalog)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn product(id: i64, embedding: Option<Vec<f32>>) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: "A product".to_string(),
            price: 9.99,
            category: "misc".to_string(),
            brand: None,
            image_url: None,
            content: "Product".to_string(),
            embedding,
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog: Catalog<Product> = Catalog::empty(3);
        assert!(catalog.is_empty());
        assert_eq!(catalog.dimension(), 3);
    }

    #[test]
    fn test_from_records_accepts_matching_dimensions() {
        let catalog = Catalog::from_records(
            vec![product(1, Some(vec![1.0, 0.0])), product(2, None)],
            2,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_records_rejects_dimension_mismatch() {
        let result = Catalog::from_records(vec![product(1, Some(vec![1.0, 0.0, 0.0]))], 2);
        assert!(matches!(result, Err(ShopsearchError::Query(_))));
    }
}
