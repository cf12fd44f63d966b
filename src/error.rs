//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// The in-memory store never fails on `set`, `get` or `del`; a missing key
/// is a normal `Ok(None)` result. The channel exists so that other
/// [`Cacher`](crate::cache::Cacher) backends can report failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration value could not be understood
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure reported by a storage backend
    #[error("Backend error: {0}")]
    Backend(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
