//! Cache type definitions

use std::time::{Duration, Instant};

use crate::config::CacheSettings;
use crate::core::org::AccountId;

/// Per-entity cache key: `"{kind}-for-account-{account_id}"`.
///
/// The read and write paths must derive keys identically or eviction
/// misses the entry the reads populate.
pub fn account_key(kind: &str, account_id: AccountId) -> String {
    format!("{kind}-for-account-{account_id}")
}

/// Cache behaviour derived from configuration
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// When disabled every read computes and nothing is stored
    pub enabled: bool,
    /// Entry time-to-live
    pub ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(300),
        }
    }
}

impl From<&CacheSettings> for CachePolicy {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            ttl: Duration::from_secs(settings.ttl_secs),
        }
    }
}

/// A cached value with its expiry
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached value
    pub value: V,
    /// When the entry stops being served
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Create an entry expiring `ttl` from now
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Whether the entry has outlived its TTL
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}
