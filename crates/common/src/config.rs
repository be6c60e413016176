use crate::error::ShopsearchError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shopsearch application configuration
///
/// Built once at startup and shared immutably; nothing reads the
/// environment after this point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding catalog files (products/materials)
    pub data_dir: PathBuf,

    /// Embedding provider base URL (OpenAI-compatible)
    pub embedding_base_url: String,

    /// Embedding provider API key
    pub embedding_api_key: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Expected embedding dimension
    pub embedding_dimension: usize,

    /// Chat completion model name
    pub chat_model: String,

    /// Upper bound on a single request to an external provider, in seconds.
    /// Covers embedding calls and the whole chat completion stream.
    pub request_timeout_secs: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            embedding_base_url: "https://api.openai.com/v1".to_string(),
            embedding_api_key: String::new(),
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dimension: 1536,
            chat_model: "gpt-5-mini".to_string(),
            request_timeout_secs: 30,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./data/log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, ShopsearchError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            data_dir: Self::get_env_path("DATA_DIR").unwrap_or(defaults.data_dir),
            embedding_base_url: std::env::var("EMBEDDING_BASE_URL")
                .unwrap_or(defaults.embedding_base_url),
            embedding_api_key: std::env::var("EMBEDDING_API_KEY")
                .unwrap_or(defaults.embedding_api_key),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            embedding_dimension: std::env::var("EMBEDDING_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.embedding_dimension),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), ShopsearchError> {
        for dir in [&self.data_dir, &self.log_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    ShopsearchError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Path of the product catalog file
    pub fn product_catalog_path(&self) -> PathBuf {
        self.data_dir.join("products.catalog.json")
    }

    /// Path of the material catalog file
    pub fn material_catalog_path(&self) -> PathBuf {
        self.data_dir.join("materials.catalog.json")
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ShopsearchError> {
        if !self.embedding_base_url.starts_with("http://")
            && !self.embedding_base_url.starts_with("https://")
        {
            return Err(ShopsearchError::config(
                "Embedding base URL must start with http:// or https://",
            ));
        }

        if self.embedding_model.is_empty() {
            return Err(ShopsearchError::config("Embedding model name cannot be empty"));
        }

        if self.embedding_dimension == 0 {
            return Err(ShopsearchError::config("Embedding dimension cannot be 0"));
        }

        if self.server_port == 0 {
            return Err(ShopsearchError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.embedding_dimension, 1536);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_catalog_paths() {
        let config = AppConfig::default();
        assert!(config.product_catalog_path().ends_with("products.catalog.json"));
        assert!(config.material_catalog_path().ends_with("materials.catalog.json"));
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.embedding_base_url = "localhost:1234".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.embedding_dimension = 0;
        assert!(invalid_config.validate().is_err());
    }
}
