use serde::{Deserialize, Serialize};

/// Retail product record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable external identifier
    pub id: i64,

    /// Product title
    pub title: String,

    /// Product description
    pub description: String,

    /// Price (decimal, two fractional digits in source data)
    pub price: f64,

    /// Category
    pub category: String,

    /// Brand
    #[serde(default)]
    pub brand: Option<String>,

    /// Image URL
    #[serde(default)]
    pub image_url: Option<String>,

    /// Descriptive text blob the embedding was computed from
    pub content: String,

    /// Stored embedding; records without one are not searchable
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

/// Electrical material record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Stable external identifier
    pub id: i64,

    /// External reference code
    pub ea_number: String,

    /// Material name
    pub name: String,

    /// Material description
    pub description: String,

    /// Category
    pub category: String,

    /// Open attribute map
    pub specs: serde_json::Value,

    /// Installation time estimate in minutes
    pub time_estimation: f64,

    /// Price
    pub price: f64,

    /// Stored embedding; records without one are not searchable
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

/// Record carrying an id and an optional stored embedding
pub trait EmbeddedRecord {
    fn id(&self) -> i64;
    fn embedding(&self) -> Option<&[f32]>;
}

impl EmbeddedRecord for Product {
    fn id(&self) -> i64 {
        self.id
    }

    fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }
}

impl EmbeddedRecord for Material {
    fn id(&self) -> i64 {
        self.id
    }

    fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }
}

/// Product search match (projection, never includes the embedding)
#[derive(Debug, Clone, Serialize)]
pub struct ProductMatch {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub similarity: f32,
}

/// Material search match (projection, never includes the embedding)
#[derive(Debug, Clone, Serialize)]
pub struct MaterialMatch {
    pub id: i64,
    pub ea_number: String,
    pub name: String,
    pub description: String,
    pub time_estimation: f64,
    pub specs: serde_json::Value,
    pub similarity: f32,
}
