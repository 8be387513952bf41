//! Cache-aside store implementation

use dashmap::DashMap;
use std::future::Future;
use tracing::debug;

use super::types::{CacheEntry, CachePolicy, account_key};
use crate::core::org::AccountId;
use crate::utils::error::Result;

/// Process-wide keyed cache for one kind of entity.
///
/// Reads and writes to a given key are deliberately not mutually
/// exclusive: between a write committing and its eviction landing, a
/// concurrent read may serve the previous generation once more before
/// the next read recomputes. That at-most-one-generation staleness is a
/// documented tradeoff of the cache-aside discipline; do not add locking
/// around the supplier to "fix" it.
pub struct CacheAsideStore<V> {
    kind: String,
    entries: DashMap<String, CacheEntry<V>>,
    policy: CachePolicy,
}

impl<V: Clone> CacheAsideStore<V> {
    /// Create a store for one cache kind
    pub fn new(kind: impl Into<String>, policy: CachePolicy) -> Self {
        Self {
            kind: kind.into(),
            entries: DashMap::new(),
            policy,
        }
    }

    /// The kind this store was created for
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Derive this store's key for an account
    pub fn key_for_account(&self, account_id: AccountId) -> String {
        account_key(&self.kind, account_id)
    }

    /// Derive this store's key for an arbitrary per-entity identifier,
    /// using the same `"{kind}-for-account-{id}"` scheme as the reads
    pub fn key_for(&self, entity: impl std::fmt::Display) -> String {
        format!("{}-for-account-{}", self.kind, entity)
    }

    /// Return the cached value for `key`, computing it via `supplier` on
    /// a miss.
    ///
    /// `bypass` skips only the read check: the freshly computed value is
    /// still written back, overwriting whatever the cache held. A failed
    /// supplier propagates to the caller and leaves the cache untouched.
    pub async fn from_cacheable_fn<F, Fut>(&self, key: &str, bypass: bool, supplier: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if self.policy.enabled && !bypass {
            if let Some(entry) = self.entries.get(key) {
                if !entry.is_expired() {
                    debug!(kind = %self.kind, key, "Cache hit");
                    return Ok(entry.value.clone());
                }
            }
            // Expired entries fall through to the supplier; the write-back
            // below replaces them.
        }

        debug!(kind = %self.kind, key, bypass, "Cache miss, invoking supplier");
        let value = supplier().await?;

        if self.policy.enabled {
            self.entries
                .insert(key.to_string(), CacheEntry::new(value.clone(), self.policy.ttl));
        }

        Ok(value)
    }

    /// Remove the entry for `key` if present; a miss is not an error.
    ///
    /// Returns whether an entry was removed. Write paths call this after
    /// the underlying write, and must attempt it even when later steps of
    /// the write path fail.
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        debug!(kind = %self.kind, key, removed, "Cache invalidated");
        removed
    }

    /// Invalidate the per-account entry for this store's kind
    pub fn invalidate_for_account(&self, account_id: AccountId) -> bool {
        self.invalidate(&self.key_for_account(account_id))
    }

    /// Number of live entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
