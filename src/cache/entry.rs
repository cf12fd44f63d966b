//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their staleness rules.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

// == Entry Options ==
/// Per-entry expiry settings given at `set` time.
///
/// Both fields are optional and independent. When both are set the entry is
/// outdated as soon as either condition holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryOptions {
    /// Absolute point in time after which the entry is stale
    pub expiry_at: Option<DateTime<Utc>>,
    /// Maximum age measured from the write time
    pub ttl: Option<Duration>,
}

impl EntryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a TTL relative to the write time.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets an absolute expiry date.
    pub fn with_expiry_date(mut self, expiry_at: DateTime<Utc>) -> Self {
        self.expiry_at = Some(expiry_at);
        self
    }

    /// Returns true if neither TTL nor expiry date is set.
    pub fn is_unbounded(&self) -> bool {
        self.expiry_at.is_none() && self.ttl.is_none()
    }
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<K, V> {
    /// The key the entry is stored under
    pub key: K,
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub written_at: DateTime<Utc>,
    /// Per-entry expiry settings
    pub options: EntryOptions,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(key: K, value: V, options: EntryOptions) -> Self {
        Self {
            key,
            value,
            written_at: Utc::now(),
            options,
        }
    }

    // == Is Outdated ==
    /// Checks whether the entry is stale by either its expiry date or its TTL.
    pub fn is_outdated(&self) -> bool {
        self.is_outdated_at(Utc::now())
    }

    /// Checks whether the absolute expiry date has passed.
    pub fn is_past_expiry_date(&self) -> bool {
        self.is_past_expiry_date_at(Utc::now())
    }

    /// Checks whether the entry is older than its own TTL.
    pub fn is_past_ttl(&self) -> bool {
        self.is_past_ttl_at(Utc::now())
    }

    /// [`is_outdated`](Self::is_outdated) evaluated at `now`.
    pub fn is_outdated_at(&self, now: DateTime<Utc>) -> bool {
        self.is_past_expiry_date_at(now) || self.is_past_ttl_at(now)
    }

    /// [`is_past_expiry_date`](Self::is_past_expiry_date) evaluated at `now`.
    ///
    /// Boundary: an entry expiring exactly at `now` is still valid.
    pub fn is_past_expiry_date_at(&self, now: DateTime<Utc>) -> bool {
        self.options.expiry_at.is_some_and(|expiry| now > expiry)
    }

    /// [`is_past_ttl`](Self::is_past_ttl) evaluated at `now`.
    pub fn is_past_ttl_at(&self, now: DateTime<Utc>) -> bool {
        self.options
            .ttl
            .is_some_and(|ttl| self.is_older_than_at(ttl, now))
    }

    /// Checks whether more than `max_age` has elapsed since the write, as of `now`.
    ///
    /// Used for both the per-entry TTL and the cache-wide default TTL.
    /// A `max_age` too large to represent never elapses.
    pub fn is_older_than_at(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        match TimeDelta::from_std(max_age) {
            Ok(max_age) => now.signed_duration_since(self.written_at) > max_age,
            Err(_) => false,
        }
    }
}
