//! Cache Module
//!
//! Provides the in-memory key/value store with lazy TTL expiration.

mod cacher;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use cacher::Cacher;
pub use entry::{Entry, EntryOptions};
pub use stats::CacheStats;
pub use store::{Cache, CacheBuilder};
