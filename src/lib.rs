//! Mini Cache - A generic in-process key/value cache
//!
//! Provides lazy TTL expiration and pluggable eviction ranking policies
//! (no-op, least recently used, least frequently used).
//!
//! ```
//! use std::time::Duration;
//! use mini_cache::{Cache, EntryOptions, LruEvicter};
//!
//! let cache: Cache<&str, i32> = Cache::builder()
//!     .evicter(LruEvicter::new())
//!     .default_ttl(Duration::from_secs(60))
//!     .build();
//!
//! cache.set("a", 1, EntryOptions::new()).unwrap();
//! cache.set("b", 2, EntryOptions::new().with_ttl(Duration::from_secs(5))).unwrap();
//!
//! assert_eq!(cache.get(&"a").unwrap(), Some(1));
//! assert_eq!(cache.evictees(1), vec!["b"]);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod evicter;

pub use cache::{Cache, CacheBuilder, CacheStats, Cacher, Entry, EntryOptions};
pub use config::{CacheConfig, EvictionPolicy};
pub use error::{CacheError, Result};
pub use evicter::{Evicter, LfuEvicter, LruEvicter, NoEvicter};
