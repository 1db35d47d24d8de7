//! Error types for SpamWatch

/// Result type alias using SpamWatch's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for SpamWatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifact is missing, malformed or internally inconsistent
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Vectorization or scoring failed for a particular input
    #[error("transform error: {0}")]
    Transform(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new transform error
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error happened while scoring a single message
    pub fn is_transform(&self) -> bool {
        matches!(self, Self::Transform(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::transform("expected 12 features, got 9");
        assert_eq!(err.to_string(), "transform error: expected 12 features, got 9");
        assert!(err.is_transform());

        let err = Error::artifact("missing vectorizer");
        assert_eq!(err.to_string(), "artifact error: missing vectorizer");
        assert!(!err.is_transform());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
