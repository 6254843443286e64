//! Cache Configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Which qualifying entry a lookup returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// First entry in insertion order at or above the threshold
    #[default]
    First,
    /// Highest scoring entry at or above the threshold
    Best,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::First => write!(f, "first"),
            MatchPolicy::Best => write!(f, "best"),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(MatchPolicy::First),
            "best" => Ok(MatchPolicy::Best),
            other => Err(CacheError::configuration(format!(
                "unknown match policy: {other} (expected 'first' or 'best')"
            ))),
        }
    }
}

/// Semantic cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Embedding model identifier, opaque to the cache
    pub embedding_model: String,

    /// Minimum similarity for a hit, in (0, 1]
    pub similarity_threshold: f32,

    /// Maximum entry age
    pub ttl: Duration,

    /// Selection among several qualifying entries
    pub match_policy: MatchPolicy,

    /// Maximum number of entries (None = unlimited)
    pub max_entries: Option<usize>,

    /// Background sweeper interval
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            embedding_model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            similarity_threshold: 0.90,
            ttl: Duration::from_secs(3600),
            match_policy: MatchPolicy::First,
            max_entries: None,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl CacheConfig {
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set TTL from fractional seconds, rejecting negative or non-finite values
    pub fn with_ttl_secs(mut self, secs: f64) -> Result<Self> {
        self.ttl = Duration::try_from_secs_f64(secs)
            .map_err(|e| CacheError::configuration(format!("invalid ttl {secs}: {e}")))?;
        Ok(self)
    }

    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Check threshold and TTL bounds
    pub fn validate(&self) -> Result<()> {
        let threshold = self.similarity_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(CacheError::configuration(format!(
                "similarity threshold must be in (0, 1], got {threshold}"
            )));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::configuration("ttl must be positive"));
        }
        if self.max_entries == Some(0) {
            return Err(CacheError::configuration("max_entries must be at least 1"));
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::configuration("sweep interval must be positive"));
        }
        Ok(())
    }
}
