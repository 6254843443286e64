//! Cache Statistics
//!
//! Lifetime counters, lookup latency and the snapshot handed to callers.

use std::fmt;
use std::time::Duration;

/// Counters kept under the cache lock
#[derive(Debug, Clone, Copy)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,

    /// Latency of completed lookups, embedding included
    latency_sum_us: u64,
    latency_min_us: u64,
    latency_max_us: u64,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            hits: 0,
            misses: 0,
            evictions: 0,
            expirations: 0,
            latency_sum_us: 0,
            latency_min_us: u64::MAX,
            latency_max_us: 0,
        }
    }
}

impl Counters {
    pub fn record_hit(&mut self, latency: Duration) {
        self.hits += 1;
        self.record_latency(latency);
    }

    pub fn record_miss(&mut self, latency: Duration) {
        self.misses += 1;
        self.record_latency(latency);
    }

    fn record_latency(&mut self, latency: Duration) {
        let latency_us = latency.as_micros() as u64;
        self.latency_sum_us = self.latency_sum_us.saturating_add(latency_us);
        self.latency_min_us = self.latency_min_us.min(latency_us);
        self.latency_max_us = self.latency_max_us.max(latency_us);
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn snapshot(&self, entries: usize) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            entries,
            hits: self.hits,
            misses: self.misses,
            hit_rate: hit_rate(self.hits, self.misses),
            evictions: self.evictions,
            expirations: self.expirations,
            avg_latency_us: if lookups == 0 {
                0.0
            } else {
                self.latency_sum_us as f64 / lookups as f64
            },
            min_latency_us: if self.latency_min_us == u64::MAX {
                0
            } else {
                self.latency_min_us
            },
            max_latency_us: self.latency_max_us,
        }
    }
}

/// Hit percentage, 0 when nothing has been looked up
fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64 * 100.0
}

/// Point-in-time cache statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    /// Live entries
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Hits as a percentage of lookups
    pub hit_rate: f64,
    /// Entries dropped to respect `max_entries`
    pub evictions: u64,
    /// Entries purged after their TTL
    pub expirations: u64,
    /// Mean lookup latency in microseconds
    pub avg_latency_us: f64,
    pub min_latency_us: u64,
    pub max_latency_us: u64,
}

impl CacheStats {
    /// Completed lookups
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entries: {} | Hits: {} | Misses: {} | Hit rate: {:.1}% | Evicted: {} | Expired: {} | Latency (µs): avg={:.1}, min={}, max={}",
            self.entries,
            self.hits,
            self.misses,
            self.hit_rate,
            self.evictions,
            self.expirations,
            self.avg_latency_us,
            self.min_latency_us,
            self.max_latency_us
        )
    }
}
