//! Settings service

use std::sync::Arc;
use tracing::info;

use super::directory::DirectoryService;
use crate::core::cache::{CacheAsideStore, CachePolicy};
use crate::core::org::{AccountId, OrgNodeId};
use crate::core::settings::{
    AccountSetting, EffectiveSettings, PlatformSetting, SettingOverride, resolve,
};
use crate::storage::ConfigStore;
use crate::utils::error::{EngineError, Result};

const OVERRIDES_KIND: &str = "org-settings";
const ACCOUNT_KIND: &str = "account-settings";
const PLATFORM_KIND: &str = "platform-settings";

/// Key for the single platform-wide entry
const PLATFORM_KEY: &str = "platform-settings-global";

/// Cached settings reads, cascade resolution, and override writes
pub struct SettingsService {
    store: Arc<dyn ConfigStore>,
    directory: Arc<DirectoryService>,
    override_cache: CacheAsideStore<Vec<SettingOverride>>,
    account_cache: CacheAsideStore<Vec<AccountSetting>>,
    platform_cache: CacheAsideStore<Vec<PlatformSetting>>,
}

impl SettingsService {
    /// Create a service over the given store and directory
    pub fn new(
        store: Arc<dyn ConfigStore>,
        directory: Arc<DirectoryService>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store,
            directory,
            override_cache: CacheAsideStore::new(OVERRIDES_KIND, policy),
            account_cache: CacheAsideStore::new(ACCOUNT_KIND, policy),
            platform_cache: CacheAsideStore::new(PLATFORM_KIND, policy),
        }
    }

    /// All setting overrides for an account, cache-aside
    pub async fn setting_overrides(
        &self,
        account_id: AccountId,
        bypass: bool,
    ) -> Result<Vec<SettingOverride>> {
        let key = self.override_cache.key_for_account(account_id);
        self.override_cache
            .from_cacheable_fn(&key, bypass, || {
                self.store.load_setting_overrides(account_id)
            })
            .await
    }

    /// Effective settings for an employee viewing one team node.
    ///
    /// The organisation cascade is resolved through the team's ancestor
    /// chain; account and platform settings come back as sibling tiers,
    /// not merged into the cascade.
    pub async fn effective_settings_for_team(
        &self,
        account_id: AccountId,
        team_id: OrgNodeId,
        bypass: bool,
    ) -> Result<EffectiveSettings> {
        let chain = self
            .directory
            .ancestor_chain(account_id, team_id, bypass)
            .await?;
        let overrides = self.setting_overrides(account_id, bypass).await?;

        let account_key = self.account_cache.key_for_account(account_id);
        let account_settings = self
            .account_cache
            .from_cacheable_fn(&account_key, bypass, || {
                self.store.load_account_settings(account_id)
            })
            .await?;

        let platform_settings = self
            .platform_cache
            .from_cacheable_fn(PLATFORM_KEY, bypass, || self.store.load_platform_settings())
            .await?;

        Ok(EffectiveSettings {
            org_settings: resolve(&overrides, &chain),
            account_settings,
            platform_settings,
        })
    }

    /// Persist one override and evict the account's settings entry.
    ///
    /// Cross-tenant writes are rejected before touching the store. The
    /// eviction runs after the underlying write and is attempted
    /// regardless of the write's outcome, so a failure later in the
    /// write path cannot leave the pre-write value being served.
    pub async fn save_override(
        &self,
        account_id: AccountId,
        setting: SettingOverride,
    ) -> Result<()> {
        if setting.account_id != account_id {
            return Err(EngineError::forbidden(format!(
                "setting belongs to account {}, caller operates on account {}",
                setting.account_id, account_id
            )));
        }

        let write_result = self.store.save_setting_override(&setting).await;
        self.override_cache.invalidate_for_account(account_id);

        let org_id = write_result?;
        info!(account_id, org_id, key = %setting.key, "Saved setting override");
        Ok(())
    }
}
