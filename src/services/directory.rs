//! Organisation directory service

use std::sync::Arc;

use crate::core::cache::{CacheAsideStore, CachePolicy};
use crate::core::org::{AccountId, AncestorChain, CallerDescriptor, OrgNodeId, OrgTree};
use crate::core::visibility::prune;
use crate::storage::ConfigStore;
use crate::utils::error::{EngineError, Result};

const CACHE_KIND: &str = "org-tree";

/// Cached organisation-tree reads, visibility pruning, and ancestor
/// chain lookup
pub struct DirectoryService {
    store: Arc<dyn ConfigStore>,
    cache: CacheAsideStore<OrgTree>,
}

impl DirectoryService {
    /// Create a service over the given store
    pub fn new(store: Arc<dyn ConfigStore>, policy: CachePolicy) -> Self {
        Self {
            store,
            cache: CacheAsideStore::new(CACHE_KIND, policy),
        }
    }

    /// The full organisation tree for an account, cache-aside
    pub async fn org_tree(&self, account_id: AccountId, bypass: bool) -> Result<OrgTree> {
        let key = self.cache.key_for_account(account_id);
        self.cache
            .from_cacheable_fn(&key, bypass, || self.store.load_org_tree(account_id))
            .await
    }

    /// The subtree of the organisation tree the caller may see
    pub async fn visible_tree(
        &self,
        account_id: AccountId,
        caller: &CallerDescriptor,
        bypass: bool,
    ) -> Result<OrgTree> {
        let tree = self.org_tree(account_id, bypass).await?;
        Ok(prune(&tree, caller))
    }

    /// Flattened ancestry for one team node
    pub async fn ancestor_chain(
        &self,
        account_id: AccountId,
        team_id: OrgNodeId,
        bypass: bool,
    ) -> Result<AncestorChain> {
        let tree = self.org_tree(account_id, bypass).await?;
        AncestorChain::for_team(&tree, team_id).ok_or_else(|| {
            EngineError::not_found(format!("team {team_id} in account {account_id}"))
        })
    }
}
