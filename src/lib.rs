//! SEMCACHE - In-Memory Semantic Response Cache
//!
//! Returns a previously computed answer when a new query is close enough in
//! meaning to one already seen, within a time-to-live window. Embeddings come
//! from a pluggable [`EmbeddingProvider`].

pub mod cache;
pub mod clock;
pub mod config;
pub mod embedding;
pub mod error;

pub use cache::{CacheEntry, CacheStats, Lookup, SemanticCache, TtlSweeper};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, MatchPolicy};
pub use embedding::{EmbeddingProvider, HashingEmbedder};
pub use error::{CacheError, EmbeddingError};
