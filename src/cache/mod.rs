//! Cache Engine
//!
//! Semantic response cache with TTL expiry and hit/miss statistics.

mod entry;
mod semantic;
mod stats;
mod sweeper;

pub use entry::CacheEntry;
pub use semantic::{Lookup, SemanticCache};
pub use stats::CacheStats;
pub use sweeper::TtlSweeper;
