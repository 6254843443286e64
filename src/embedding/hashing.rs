//! Hashing Embedder
//!
//! Deterministic bag-of-words embedder. Each lowercase word and word pair is
//! hashed (FNV-1a) into a signed bucket. It captures lexical overlap only and
//! stands in for a real sentence model in the CLI and in tests.

use super::EmbeddingProvider;
use crate::error::EmbeddingError;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Weight of a word pair relative to a single word
const BIGRAM_WEIGHT: f32 = 0.5;

/// Feature-hashing embedding provider
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    model_name: String,
    dimension: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new("hashing-256", 256)
    }
}

impl HashingEmbedder {
    /// Create an embedder producing `dimension`-length vectors (minimum 1)
    pub fn new(model_name: impl Into<String>, dimension: usize) -> Self {
        Self {
            model_name: model_name.into(),
            dimension: dimension.max(1),
        }
    }

    /// Output vector length
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let hash = fnv1a(feature.as_bytes());
        let bucket = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl EmbeddingProvider for HashingEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(EmbeddingError::invalid_input("text contains no words"));
        }

        let mut vector = vec![0.0f32; self.dimension];
        for token in &tokens {
            self.add_feature(&mut vector, token, 1.0);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.add_feature(&mut vector, &bigram, BIGRAM_WEIGHT);
        }

        // Signed buckets can cancel out completely
        if vector.iter().all(|x| *x == 0.0) {
            return Err(EmbeddingError::invalid_vector(
                "all features cancelled out",
            ));
        }
        Ok(vector)
    }
}
