//! Local cache for search API responses
//!
//! One JSON file per (keyword, location, API key) triple, each carrying its own
//! expiry. Keeps repeated searches from spending paid API credits.

pub mod client;
pub mod key;
pub mod storage;

pub use client::CachedSerpClient;
pub use key::cache_key;
pub use storage::{CacheStats, CacheStorage, ClearStats};
