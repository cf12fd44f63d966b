//! Configuration Module
//!
//! Handles construction-time cache settings, optionally loaded from
//! environment variables.

use std::env;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CacheError;
use crate::evicter::{Evicter, LfuEvicter, LruEvicter, NoEvicter};

// == Eviction Policy ==
/// Names one of the built-in eviction ranking strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Track nothing; `evictees` is always empty
    #[default]
    None,
    /// Least recently used first
    Lru,
    /// Least frequently used first
    Lfu,
}

impl EvictionPolicy {
    /// Builds a fresh evicter implementing this policy.
    pub fn build<K>(self) -> Arc<dyn Evicter<K>>
    where
        K: Eq + Hash + Clone + Send + Sync + 'static,
    {
        match self {
            EvictionPolicy::None => Arc::new(NoEvicter::new()),
            EvictionPolicy::Lru => Arc::new(LruEvicter::new()),
            EvictionPolicy::Lfu => Arc::new(LfuEvicter::new()),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(EvictionPolicy::None),
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown eviction policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvictionPolicy::None => "none",
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
        };
        f.write_str(name)
    }
}

// == Cache Config ==
/// Cache configuration parameters, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied to every entry on top of its own options, None = no default
    pub default_ttl: Option<Duration>,
    /// Strategy used to rank eviction candidates
    pub eviction_policy: EvictionPolicy,
}

impl CacheConfig {
    /// Creates a configuration with no default TTL and no eviction tracking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache-wide default TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Sets the eviction policy.
    pub fn with_eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction_policy = policy;
        self
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: unset, `0` = unset)
    /// - `CACHE_EVICTION_POLICY` - `none`, `lru` or `lfu` (default: none)
    ///
    /// Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        let default_ttl = env::var("CACHE_DEFAULT_TTL_MS").ok().and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    warn!(value = %raw, "ignoring unparsable CACHE_DEFAULT_TTL_MS");
                    None
                }
            }
        });

        let eviction_policy = env::var("CACHE_EVICTION_POLICY")
            .ok()
            .and_then(|raw| match raw.parse::<EvictionPolicy>() {
                Ok(policy) => Some(policy),
                Err(err) => {
                    warn!(error = %err, "ignoring CACHE_EVICTION_POLICY");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            default_ttl,
            eviction_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl, None);
        assert_eq!(config.eviction_policy, EvictionPolicy::None);
    }

    #[test]
    fn test_config_builder_methods() {
        let config = CacheConfig::new()
            .with_default_ttl(Duration::from_millis(250))
            .with_eviction_policy(EvictionPolicy::Lfu);
        assert_eq!(config.default_ttl, Some(Duration::from_millis(250)));
        assert_eq!(config.eviction_policy, EvictionPolicy::Lfu);
    }

    // Single test so the env mutations don't race with each other.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_EVICTION_POLICY");
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var("CACHE_DEFAULT_TTL_MS", "1500");
        env::set_var("CACHE_EVICTION_POLICY", "LRU");
        let config = CacheConfig::from_env();
        assert_eq!(config.default_ttl, Some(Duration::from_millis(1500)));
        assert_eq!(config.eviction_policy, EvictionPolicy::Lru);

        env::set_var("CACHE_DEFAULT_TTL_MS", "soon");
        env::set_var("CACHE_EVICTION_POLICY", "random");
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var("CACHE_DEFAULT_TTL_MS", "0");
        assert_eq!(CacheConfig::from_env().default_ttl, None);

        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_EVICTION_POLICY");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("lfu".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::Lfu);
        assert_eq!(" Lru ".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::Lru);
        assert_eq!("none".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::None);

        let err = "mru".parse::<EvictionPolicy>().unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig(_)));
    }

    #[test]
    fn test_policy_display_matches_parse() {
        for policy in [EvictionPolicy::None, EvictionPolicy::Lru, EvictionPolicy::Lfu] {
            assert_eq!(policy.to_string().parse::<EvictionPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&EvictionPolicy::Lfu).unwrap();
        assert_eq!(json, r#""lfu""#);

        let policy: EvictionPolicy = serde_json::from_str(r#""lru""#).unwrap();
        assert_eq!(policy, EvictionPolicy::Lru);
    }

    #[test]
    fn test_policy_build() {
        let evicter = EvictionPolicy::Lfu.build::<String>();
        evicter.promote(&"a".to_string(), 2);
        evicter.promote(&"b".to_string(), 1);
        assert_eq!(evicter.evictees(1), vec!["b".to_string()]);

        let evicter = EvictionPolicy::None.build::<String>();
        evicter.promote(&"a".to_string(), 1);
        assert!(evicter.evictees(1).is_empty());
    }
}
