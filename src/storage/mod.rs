//! Storage and audit boundaries
//!
//! The engine consumes, and must not assume more than, these collaborator
//! contracts. Store-specific failures surface as
//! [`EngineError::Persistence`](crate::EngineError::Persistence) and are
//! never retried here; the backing technology is the embedder's choice.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::org::{AccountId, OrgNodeId, OrgTree};
use crate::core::permissions::PermissionGrant;
use crate::core::settings::{AccountSetting, PlatformSetting, SettingOverride};
use crate::utils::error::Result;

/// Persistence boundary for settings, grants, and the organisation tree.
///
/// Each call either succeeds or raises an error the engine treats
/// opaquely as a persistence failure.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// All organisation-node setting overrides for an account
    async fn load_setting_overrides(&self, account_id: AccountId) -> Result<Vec<SettingOverride>>;

    /// Account-wide settings
    async fn load_account_settings(&self, account_id: AccountId) -> Result<Vec<AccountSetting>>;

    /// Platform-wide settings
    async fn load_platform_settings(&self) -> Result<Vec<PlatformSetting>>;

    /// All grants stored for an account
    async fn load_grants(&self, account_friendly_name: &str) -> Result<Vec<PermissionGrant>>;

    /// The account's organisation tree
    async fn load_org_tree(&self, account_id: AccountId) -> Result<OrgTree>;

    /// Persist one grant
    async fn save_grant(&self, account_id: AccountId, grant: &PermissionGrant) -> Result<()>;

    /// Delete one grant; deleting an absent grant is a
    /// [`NotFound`](crate::EngineError::NotFound) error
    async fn delete_grant(&self, account_id: AccountId, grant: &PermissionGrant) -> Result<()>;

    /// Persist one setting override for a node
    async fn save_setting_override(&self, setting: &SettingOverride) -> Result<OrgNodeId>;
}

/// Which direction a grant batch moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Grants were added
    GrantsAdded,
    /// Grants were removed
    GrantsRemoved,
}

/// One audit record per add/remove batch.
///
/// Empty batches still produce a record with an empty role summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Account the batch applied to
    pub account_friendly_name: String,
    /// Add or remove
    pub action: AuditAction,
    /// Distinct roles the batch touched
    pub roles: BTreeSet<String>,
    /// When the batch was applied
    pub at: DateTime<Utc>,
}

/// Fire-and-forget audit sink.
///
/// Sink failures must not fail the grant mutation that produced the
/// record; the services log and ignore them.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record one batch
    async fn record(&self, record: AuditRecord) -> Result<()>;
}
