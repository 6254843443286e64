//! TTL Sweeper
//!
//! Background task that periodically removes expired entries from a
//! SemanticCache. Lookups purge lazily anyway; the sweeper only bounds how
//! long expired entries sit in memory when the cache goes idle.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::SemanticCache;

/// Background TTL sweep task
pub struct TtlSweeper {
    cache: Arc<SemanticCache>,
    interval: Duration,
}

impl TtlSweeper {
    /// Create a sweeper using the cache's configured interval
    pub fn new(cache: Arc<SemanticCache>) -> Self {
        let interval = cache.config().sweep_interval;
        Self { cache, interval }
    }

    /// Override the sweep interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the sweeper (should be spawned as a task)
    pub async fn run(self) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("TTL sweeper started, interval: {:?}", self.interval);

        loop {
            ticker.tick().await;
            let removed = self.cache.purge_expired();
            if removed > 0 {
                debug!(removed = removed, "Swept expired entries");
            }
        }
    }

    /// Spawn the sweeper as a background task
    pub fn spawn(cache: Arc<SemanticCache>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(Self::new(cache).run())
    }
}
