//! Cache Entry

use std::time::{Duration, Instant};

/// A cached query with its normalized embedding and response
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Original query text, the map key
    pub query: String,
    /// Unit-length embedding of the query
    pub embedding: Vec<f32>,
    /// Response returned verbatim on a hit
    pub response: String,
    /// Insertion time, never refreshed by reads
    pub created_at: Instant,
    /// Insertion order, kept across overwrites
    pub(crate) seq: u64,
}

impl CacheEntry {
    pub(crate) fn new(
        query: String,
        embedding: Vec<f32>,
        response: String,
        created_at: Instant,
        seq: u64,
    ) -> Self {
        Self {
            query,
            embedding,
            response,
            created_at,
            seq,
        }
    }

    /// Age relative to `now` (zero if `now` precedes creation)
    #[inline]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    /// Expired once age reaches the TTL
    #[inline]
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }

    /// Get embedding dimension
    pub fn dim(&self) -> usize {
        self.embedding.len()
    }
}
