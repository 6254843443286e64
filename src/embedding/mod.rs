//! Embedding Module
//!
//! Provider interface consumed by the cache, plus vector math.

mod hashing;
pub mod similarity;

pub use hashing::HashingEmbedder;
pub use similarity::{cosine_similarity, dot_product, magnitude, normalize_vector, normalized};

use crate::error::EmbeddingError;

/// Source of text embeddings
///
/// The cache treats implementations as pure functions: the same text must
/// yield the same vector for a given model, and every vector from one
/// provider must have the same length.
pub trait EmbeddingProvider: Send + Sync {
    /// Model identifier, for logging and display
    fn model_name(&self) -> &str;

    /// Embed a piece of text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Score two unit-length vectors
    ///
    /// Must be symmetric and return 1.0 for identical input. The default is
    /// the dot product, which equals cosine similarity for normalized vectors.
    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        dot_product(a, b)
    }
}
