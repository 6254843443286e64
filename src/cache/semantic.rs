//! Semantic Cache
//!
//! Response cache keyed by query meaning. A lookup embeds the query and scans
//! every live entry, so cost grows linearly with the number of entries.

use hashbrown::HashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::entry::CacheEntry;
use super::stats::{CacheStats, Counters};
use crate::clock::{Clock, SystemClock};
use crate::config::{CacheConfig, MatchPolicy};
use crate::embedding::{normalize_vector, EmbeddingProvider};
use crate::error::{CacheError, Result};

/// Outcome of a cache lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Hit {
        /// Stored response
        response: String,
        /// Score of the matched entry
        similarity: f32,
        /// Key of the matched entry
        matched_query: String,
    },
    Miss,
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit { .. })
    }

    /// Response on a hit
    pub fn response(&self) -> Option<&str> {
        match self {
            Lookup::Hit { response, .. } => Some(response),
            Lookup::Miss => None,
        }
    }

    /// Similarity on a hit
    pub fn similarity(&self) -> Option<f32> {
        match self {
            Lookup::Hit { similarity, .. } => Some(*similarity),
            Lookup::Miss => None,
        }
    }
}

/// State guarded by the cache lock
#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    counters: Counters,
    /// Fixed by the first stored vector, released by `clear`
    dimension: Option<usize>,
    next_seq: u64,
}

impl Inner {
    fn check_dimension(&self, actual: usize) -> Result<()> {
        match self.dimension {
            Some(expected) if expected != actual => {
                Err(CacheError::DimensionMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }

    /// Entries still within their TTL at `now`
    fn live_count(&self, now: Instant, ttl: Duration) -> usize {
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now, ttl))
            .count()
    }

    fn purge_expired(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, ttl));
        let removed = before - self.entries.len();
        self.counters.record_expirations(removed);
        removed
    }

    /// Drop oldest entries until one more fits under `max`
    fn evict_for_insert(&mut self, max: usize) -> usize {
        let mut evicted = 0;
        while self.entries.len() >= max {
            let oldest = self
                .entries
                .values()
                .min_by_key(|entry| (entry.created_at, entry.seq))
                .map(|entry| entry.query.clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                    evicted += 1;
                }
                None => break,
            }
        }
        self.counters.record_evictions(evicted);
        evicted
    }
}

/// In-memory semantic response cache
///
/// All map mutation, counters and expiry run under one lock. Embedding runs
/// before the lock is taken so slow inference does not block other callers.
pub struct SemanticCache {
    provider: Arc<dyn EmbeddingProvider>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for SemanticCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticCache")
            .field("model", &self.provider.model_name())
            .field("config", &self.config)
            .field(
                "entries",
                &self
                    .inner
                    .try_lock()
                    .map(|inner| inner.live_count(self.clock.now(), self.config.ttl)),
            )
            .finish()
    }
}

impl SemanticCache {
    /// Create a cache using the system clock
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: CacheConfig) -> Result<Self> {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Create a cache reading time from `clock`
    ///
    /// `config.embedding_model` is informational; the provider decides which
    /// model actually runs. A differing name is logged, not rejected.
    pub fn with_clock(
        provider: Arc<dyn EmbeddingProvider>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        if config.embedding_model != provider.model_name() {
            warn!(
                configured = %config.embedding_model,
                provider = provider.model_name(),
                "Configured embedding model differs from provider"
            );
        }

        info!(
            model = provider.model_name(),
            threshold = config.similarity_threshold,
            ttl = ?config.ttl,
            policy = %config.match_policy,
            "Semantic cache created"
        );

        Ok(Self {
            provider,
            clock,
            config,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// Embed and normalize without touching cache state
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = self.provider.embed(text)?;
        normalize_vector(&mut vector)?;
        Ok(vector)
    }

    /// Look up a response for a semantically similar query
    pub fn get(&self, query: &str) -> Result<Lookup> {
        let started = Instant::now();
        let query_vec = self.embed(query)?;

        let mut inner = self.inner.lock();
        let now = self.clock.now();

        let purged = inner.purge_expired(now, self.config.ttl);
        if purged > 0 {
            debug!(removed = purged, "Purged expired entries");
        }
        inner.check_dimension(query_vec.len())?;

        let threshold = self.config.similarity_threshold;
        let mut chosen: Option<(&CacheEntry, f32)> = None;
        for entry in inner.entries.values() {
            let score = self.provider.similarity(&query_vec, &entry.embedding);
            // Written this way so a NaN score never qualifies
            if !(score >= threshold) {
                continue;
            }
            let better = match chosen {
                None => true,
                Some((current, current_score)) => match self.config.match_policy {
                    MatchPolicy::First => entry.seq < current.seq,
                    MatchPolicy::Best => {
                        score > current_score
                            || (score == current_score && entry.seq < current.seq)
                    }
                },
            };
            if better {
                chosen = Some((entry, score));
            }
        }

        let outcome = match chosen {
            Some((entry, similarity)) => Lookup::Hit {
                response: entry.response.clone(),
                similarity,
                matched_query: entry.query.clone(),
            },
            None => Lookup::Miss,
        };

        match &outcome {
            Lookup::Hit {
                similarity,
                matched_query,
                ..
            } => {
                inner.counters.record_hit(started.elapsed());
                debug!(similarity = *similarity, matched = %matched_query, "Semantic cache hit");
            }
            Lookup::Miss => {
                inner.counters.record_miss(started.elapsed());
                debug!(entries = inner.entries.len(), "Semantic cache miss");
            }
        }

        Ok(outcome)
    }

    /// Store a response under the exact query text, replacing any previous one
    pub fn set(&self, query: &str, response: &str) -> Result<()> {
        let embedding = self.embed(query)?;

        let mut inner = self.inner.lock();
        let now = self.clock.now();
        inner.check_dimension(embedding.len())?;

        let live_seq = inner
            .entries
            .get(query)
            .filter(|entry| !entry.is_expired(now, self.config.ttl))
            .map(|entry| entry.seq);

        if live_seq.is_none() {
            if let Some(max) = self.config.max_entries {
                if inner.entries.len() >= max {
                    inner.purge_expired(now, self.config.ttl);
                    let evicted = inner.evict_for_insert(max);
                    if evicted > 0 {
                        debug!(evicted = evicted, max = max, "Evicted oldest entries");
                    }
                }
            }
        }

        let seq = match live_seq {
            Some(seq) => seq,
            None => {
                let seq = inner.next_seq;
                inner.next_seq += 1;
                seq
            }
        };

        let entry = CacheEntry::new(
            query.to_string(),
            embedding,
            response.to_string(),
            now,
            seq,
        );
        if inner.dimension.is_none() {
            inner.dimension = Some(entry.dim());
        }
        inner.entries.insert(query.to_string(), entry);
        debug!(query = %query, entries = inner.entries.len(), "Stored cache entry");
        Ok(())
    }

    /// Normalized embedding of `query`, for display
    ///
    /// Does not record a hit or miss and leaves entries untouched.
    pub fn get_embedding(&self, query: &str) -> Result<Vec<f32>> {
        self.embed(query)
    }

    /// Current statistics
    ///
    /// Counts only live entries; expired ones awaiting purge are not reported.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let now = self.clock.now();
        inner
            .counters
            .snapshot(inner.live_count(now, self.config.ttl))
    }

    /// Remove all entries. Hit and miss counters are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.dimension = None;
        info!(removed = removed, "Semantic cache cleared");
    }

    /// Remove expired entries, returns count of removed entries
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let now = self.clock.now();
        inner.purge_expired(now, self.config.ttl)
    }

    /// Whether a live entry exists for this exact query text
    pub fn contains(&self, query: &str) -> bool {
        let inner = self.inner.lock();
        let now = self.clock.now();
        inner
            .entries
            .get(query)
            .map(|entry| !entry.is_expired(now, self.config.ttl))
            .unwrap_or(false)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let inner = self.inner.lock();
        inner.live_count(self.clock.now(), self.config.ttl)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Embedding model reported by the provider
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }
}
