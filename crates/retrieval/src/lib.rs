//! Shopsearch retrieval core
//!
//! Similarity search, ranking and projection over the product and material
//! catalogs, plus the offline ingestion path that builds them.

mod catalog;
mod context;
mod engine;
mod ingest;
mod service;
mod similarity;
mod types;

pub use catalog::{Catalog, CatalogFile};
pub use context::product_context;
pub use engine::{search, SearchPolicy};
pub use ingest::{Ingestor, MaterialSeedFile, ProductSeedFile, SourceMaterial, SourceProduct};
pub use service::{MaterialRetrieval, ProductRetrieval, MATERIAL_POLICY, PRODUCT_POLICY};
pub use similarity::cosine_similarity;
pub use types::{EmbeddedRecord, Material, MaterialMatch, Product, ProductMatch};
