//! Permission service

use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::cache::{CacheAsideStore, CachePolicy};
use crate::core::org::{AccountId, CallerDescriptor, CallerKind};
use crate::core::permissions::{
    GrantDiff, PermissionEngine, PermissionGrant, PermissionsResponse, diff_grants, role_summary,
};
use crate::storage::{AuditAction, AuditRecord, AuditSink, ConfigStore};
use crate::utils::error::{EngineError, Result};

const CACHE_KIND: &str = "grants";

/// Cached grant reads, permission responses, and grant mutations
pub struct PermissionService {
    store: Arc<dyn ConfigStore>,
    audit: Arc<dyn AuditSink>,
    engine: PermissionEngine,
    cache: CacheAsideStore<Vec<PermissionGrant>>,
}

impl PermissionService {
    /// Create a service over the given boundaries
    pub fn new(
        store: Arc<dyn ConfigStore>,
        audit: Arc<dyn AuditSink>,
        engine: PermissionEngine,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store,
            audit,
            engine,
            cache: CacheAsideStore::new(CACHE_KIND, policy),
        }
    }

    /// All stored grants for an account, cache-aside
    pub async fn grants(
        &self,
        account_friendly_name: &str,
        bypass: bool,
    ) -> Result<Vec<PermissionGrant>> {
        let key = self.cache.key_for(account_friendly_name);
        self.cache
            .from_cacheable_fn(&key, bypass, || {
                self.store.load_grants(account_friendly_name)
            })
            .await
    }

    /// Reduced permission response for an employee caller
    pub async fn permissions_for_employee(
        &self,
        account_friendly_name: &str,
        caller: &CallerDescriptor,
        bypass: bool,
    ) -> Result<PermissionsResponse> {
        let grants = self.grants(account_friendly_name, bypass).await?;
        Ok(self
            .engine
            .build_response_for_employee(account_friendly_name, caller, &grants))
    }

    /// Reduced permission response for a non-employee principal
    pub async fn permissions_for_non_employee(
        &self,
        kind: CallerKind,
        account_friendly_name: &str,
        bypass: bool,
    ) -> Result<PermissionsResponse> {
        let grants = self.grants(account_friendly_name, bypass).await?;
        self.engine.build_response_for_non_employee(kind, &grants)
    }

    /// Replace the account's grants with the desired set.
    ///
    /// Validation runs eagerly, before anything is mutated. The diff is
    /// computed against a fresh read of the store, removes are applied
    /// before adds, and the grants cache entry is evicted after the
    /// writes, attempted even when a write fails partway. One audit
    /// record is emitted per batch (empty batches included); audit
    /// failures are logged and never fail the mutation.
    pub async fn replace_grants(
        &self,
        account_id: AccountId,
        account_friendly_name: &str,
        desired: Vec<PermissionGrant>,
    ) -> Result<GrantDiff> {
        self.engine.validate_desired_grants(&desired)?;
        if let Some(foreign) = desired
            .iter()
            .find(|g| g.account_friendly_name != account_friendly_name)
        {
            return Err(EngineError::forbidden(format!(
                "grant for account {} in a mutation of account {}",
                foreign.account_friendly_name, account_friendly_name
            )));
        }

        let current = self.store.load_grants(account_friendly_name).await?;
        let diff = diff_grants(&current, &desired);
        if diff.is_empty() {
            return Ok(diff);
        }

        let write_result = self.apply_diff(account_id, &diff).await;
        self.cache
            .invalidate(&self.cache.key_for(account_friendly_name));
        write_result?;

        self.audit_batch(
            account_friendly_name,
            AuditAction::GrantsRemoved,
            role_summary(&diff.to_remove),
        )
        .await;
        self.audit_batch(
            account_friendly_name,
            AuditAction::GrantsAdded,
            role_summary(&diff.to_add),
        )
        .await;

        info!(
            account = account_friendly_name,
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "Replaced account grants"
        );
        Ok(diff)
    }

    async fn apply_diff(&self, account_id: AccountId, diff: &GrantDiff) -> Result<()> {
        for grant in &diff.to_remove {
            self.store.delete_grant(account_id, grant).await?;
        }
        for grant in &diff.to_add {
            self.store.save_grant(account_id, grant).await?;
        }
        Ok(())
    }

    async fn audit_batch(&self, account: &str, action: AuditAction, roles: BTreeSet<String>) {
        let record = AuditRecord {
            account_friendly_name: account.to_string(),
            action,
            roles,
            at: Utc::now(),
        };
        if let Err(e) = self.audit.record(record).await {
            warn!(account, ?action, error = %e, "Audit sink failure ignored");
        }
    }
}
