//! Error Types
//!
//! Errors surfaced by the semantic cache and its embedding providers.

use thiserror::Error;

/// Failure reported by an [`EmbeddingProvider`](crate::EmbeddingProvider)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmbeddingError {
    /// Backend could not be reached or the model is not loaded
    #[error("embedding backend unavailable: {message}")]
    Unavailable { message: String },

    /// Input text was rejected by the provider
    #[error("invalid embedding input: {message}")]
    InvalidInput { message: String },

    /// Provider returned a vector that cannot be normalized
    #[error("invalid embedding vector: {message}")]
    InvalidVector { message: String },
}

impl EmbeddingError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_vector(message: impl Into<String>) -> Self {
        Self::InvalidVector {
            message: message.into(),
        }
    }
}

/// Errors returned by [`SemanticCache`](crate::SemanticCache) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    /// Invalid threshold or TTL at construction
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Provider failed to produce a usable vector
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// Vector length differs from the entries already stored
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl CacheError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error came from the embedding provider
    pub fn is_embedding_failure(&self) -> bool {
        matches!(self, Self::Embedding(_))
    }
}

pub type Result<T, E = CacheError> = std::result::Result<T, E>;
