//! Settings type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::core::org::{AccountId, OrgNodeId};

/// Contact channel a setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Voice calls
    Voice,
    /// Web chat
    Chat,
    /// Email
    Email,
    /// SMS / messaging
    Messaging,
}

/// A key/value setting attached to one organisation node.
///
/// Keys are not globally unique; multiple nodes may define the same key
/// and resolution picks one per ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingOverride {
    /// Setting identifier
    pub id: Uuid,
    /// Organisation node this override is attached to
    pub org_id: OrgNodeId,
    /// Setting key
    pub key: String,
    /// Setting value
    pub value: String,
    /// Owning account
    pub account_id: AccountId,
    /// Channels the setting applies to
    pub capabilities: HashSet<Capability>,
    /// Whether the override is active
    pub enabled: bool,
}

/// An account-wide setting; a sibling tier to the org cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSetting {
    /// Setting identifier
    pub id: Uuid,
    /// Setting key
    pub key: String,
    /// Setting value
    pub value: String,
    /// Owning account
    pub account_id: AccountId,
}

/// A platform-wide setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSetting {
    /// Setting identifier
    pub id: Uuid,
    /// Setting key
    pub key: String,
    /// Setting value
    pub value: String,
}

/// Effective settings for one team node.
///
/// The three lists are disjoint tiers returned side by side; the account
/// and platform tiers are not deduplicated against the org cascade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectiveSettings {
    /// Result of the team → circle → super-circle cascade
    pub org_settings: Vec<SettingOverride>,
    /// Account-wide settings
    pub account_settings: Vec<AccountSetting>,
    /// Platform-wide settings
    pub platform_settings: Vec<PlatformSetting>,
}
