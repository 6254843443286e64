//! Vector Similarity Functions
//!
//! Scoring and normalization for embedding vectors.

use crate::error::EmbeddingError;

/// Compute dot product of two vectors
///
/// Uses unrolled loop for better CPU performance.
/// Callers must pass slices of equal length.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let len = a.len().min(b.len());
    let mut sum = 0.0f32;

    // Process 4 elements at a time (manual unrolling)
    let chunks = len / 4;
    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] * b[idx];
        sum += a[idx + 1] * b[idx + 1];
        sum += a[idx + 2] * b[idx + 2];
        sum += a[idx + 3] * b[idx + 3];
    }

    for i in (chunks * 4)..len {
        sum += a[i] * b[i];
    }

    sum
}

/// Euclidean length of a vector
#[inline]
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Compute cosine similarity between two vectors
///
/// Returns value in range [-1, 1] where 1 means identical direction.
/// Zero-length input scores 0.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let denom = magnitude(a) * magnitude(b);
    if denom > 0.0 {
        dot_product(a, b) / denom
    } else {
        0.0
    }
}

/// Normalize a vector in place to unit length
///
/// Rejects empty, zero-magnitude and non-finite vectors instead of
/// storing something that can never score correctly.
pub fn normalize_vector(v: &mut [f32]) -> Result<(), EmbeddingError> {
    if v.is_empty() {
        return Err(EmbeddingError::invalid_vector("empty vector"));
    }
    if v.iter().any(|x| !x.is_finite()) {
        return Err(EmbeddingError::invalid_vector("non-finite component"));
    }

    let mag = magnitude(v);
    if mag == 0.0 || !mag.is_finite() {
        return Err(EmbeddingError::invalid_vector(format!(
            "cannot normalize vector with magnitude {mag}"
        )));
    }

    // Already unit length: leave bits untouched
    if (mag - 1.0).abs() > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= mag;
        }
    }
    Ok(())
}

/// Normalize and return a new vector
pub fn normalized(v: &[f32]) -> Result<Vec<f32>, EmbeddingError> {
    let mut result = v.to_vec();
    normalize_vector(&mut result)?;
    Ok(result)
}
