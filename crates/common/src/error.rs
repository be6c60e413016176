/// Shopsearch error types
#[derive(Debug, thiserror::Error)]
pub enum ShopsearchError {
    /// Embedding provider call failed (network, auth, malformed output)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Similarity query failed (store unreachable, dimension mismatch)
    #[error("Query error: {0}")]
    Query(String),

    /// Caller supplied an invalid request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Chat completion stream could not be opened
    #[error("Chat error: {0}")]
    Chat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShopsearchError {
    /// Create provider error
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        Self::Provider(msg.into())
    }

    /// Create query error
    pub fn query<S: Into<String>>(msg: S) -> Self {
        Self::Query(msg.into())
    }

    /// Create validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create chat error
    pub fn chat<S: Into<String>>(msg: S) -> Self {
        Self::Chat(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion (for actix-web)
impl ShopsearchError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Provider(_) => 502,
            Self::Chat(_) => 502,
            Self::Query(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ShopsearchError::validation("bad query").status_code(), 400);
        assert_eq!(ShopsearchError::provider("down").status_code(), 502);
        assert_eq!(ShopsearchError::query("dim mismatch").status_code(), 500);
        assert_eq!(ShopsearchError::not_found("nope").status_code(), 404);
    }

    #[test]
    fn test_display() {
        let err = ShopsearchError::provider("connection refused");
        assert_eq!(err.to_string(), "Provider error: connection refused");
    }
}
