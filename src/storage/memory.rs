//! In-memory storage backend
//!
//! Used by the integration tests and available to embedders that want an
//! engine without external persistence. Everything lives behind
//! `parking_lot` locks; calls never fail unless a referenced entity is
//! missing.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{AuditRecord, AuditSink, ConfigStore};
use crate::core::org::{AccountId, OrgNodeId, OrgTree};
use crate::core::permissions::PermissionGrant;
use crate::core::settings::{AccountSetting, PlatformSetting, SettingOverride};
use crate::utils::error::{EngineError, Result};

/// In-memory [`ConfigStore`]
#[derive(Default)]
pub struct MemoryStore {
    overrides: RwLock<HashMap<AccountId, Vec<SettingOverride>>>,
    account_settings: RwLock<HashMap<AccountId, Vec<AccountSetting>>>,
    platform_settings: RwLock<Vec<PlatformSetting>>,
    grants: RwLock<HashMap<String, Vec<PermissionGrant>>>,
    trees: RwLock<HashMap<AccountId, OrgTree>>,
}

impl MemoryStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the organisation tree for an account
    pub fn put_org_tree(&self, tree: OrgTree) {
        self.trees.write().insert(tree.account_id, tree);
    }

    /// Seed account-wide settings
    pub fn put_account_settings(&self, account_id: AccountId, settings: Vec<AccountSetting>) {
        self.account_settings.write().insert(account_id, settings);
    }

    /// Seed platform-wide settings
    pub fn put_platform_settings(&self, settings: Vec<PlatformSetting>) {
        *self.platform_settings.write() = settings;
    }

    /// Seed stored grants for an account
    pub fn put_grants(&self, account_friendly_name: &str, grants: Vec<PermissionGrant>) {
        self.grants
            .write()
            .insert(account_friendly_name.to_string(), grants);
    }

    /// Seed setting overrides for an account
    pub fn put_setting_overrides(&self, account_id: AccountId, overrides: Vec<SettingOverride>) {
        self.overrides.write().insert(account_id, overrides);
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn load_setting_overrides(&self, account_id: AccountId) -> Result<Vec<SettingOverride>> {
        Ok(self
            .overrides
            .read()
            .get(&account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_account_settings(&self, account_id: AccountId) -> Result<Vec<AccountSetting>> {
        Ok(self
            .account_settings
            .read()
            .get(&account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_platform_settings(&self) -> Result<Vec<PlatformSetting>> {
        Ok(self.platform_settings.read().clone())
    }

    async fn load_grants(&self, account_friendly_name: &str) -> Result<Vec<PermissionGrant>> {
        Ok(self
            .grants
            .read()
            .get(account_friendly_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_org_tree(&self, account_id: AccountId) -> Result<OrgTree> {
        self.trees
            .read()
            .get(&account_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(format!("org tree for account {account_id}")))
    }

    async fn save_grant(&self, _account_id: AccountId, grant: &PermissionGrant) -> Result<()> {
        self.grants
            .write()
            .entry(grant.account_friendly_name.clone())
            .or_default()
            .push(grant.clone());
        Ok(())
    }

    async fn delete_grant(&self, _account_id: AccountId, grant: &PermissionGrant) -> Result<()> {
        let mut grants = self.grants.write();
        let stored = grants
            .get_mut(&grant.account_friendly_name)
            .ok_or_else(|| {
                EngineError::not_found(format!("grants for {}", grant.account_friendly_name))
            })?;

        let before = stored.len();
        stored.retain(|g| g != grant);
        if stored.len() == before {
            return Err(EngineError::not_found(format!(
                "grant {} for role {}",
                grant.business_function, grant.role
            )));
        }
        Ok(())
    }

    async fn save_setting_override(&self, setting: &SettingOverride) -> Result<OrgNodeId> {
        let mut overrides = self.overrides.write();
        let stored = overrides.entry(setting.account_id).or_default();
        stored.retain(|s| s.id != setting.id);
        stored.push(setting.clone());
        Ok(setting.org_id)
    }
}

/// In-memory [`AuditSink`] collecting every record
#[derive(Default)]
pub struct MemoryAuditSink {
    records: RwLock<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    /// An empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.read().clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, record: AuditRecord) -> Result<()> {
        self.records.write().push(record);
        Ok(())
    }
}
