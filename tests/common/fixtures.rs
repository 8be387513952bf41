//! Test fixtures and factories

use std::sync::Arc;
use uuid::Uuid;

use async_trait::async_trait;
use orgcfg_rs::config::EngineConfig;
use orgcfg_rs::core::settings::{AccountSetting, SettingOverride};
use orgcfg_rs::storage::memory::MemoryStore;
use orgcfg_rs::storage::ConfigStore;
use orgcfg_rs::utils::error::{EngineError, Result};
use orgcfg_rs::{
    AccountId, CallerDescriptor, OrgLevel, OrgNode, OrgNodeId, OrgTree, OrgTreeNode,
    PermissionGrant, Restriction, Scope,
};

pub const ACCOUNT_ID: AccountId = 7;
pub const ACCOUNT_NAME: &str = "acme";

/// Install the tracing subscriber for the test run. Safe to call from
/// every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}

fn node(id: OrgNodeId, level: OrgLevel, parent: Option<OrgNodeId>) -> OrgNode {
    OrgNode {
        id,
        name: format!("node-{id}"),
        level,
        parent_id: parent,
    }
}

fn team(id: OrgNodeId, parent: OrgNodeId) -> OrgTreeNode {
    OrgTreeNode {
        node: node(id, OrgLevel::Team, Some(parent)),
        children: Vec::new(),
    }
}

/// 1 super-circle (1) / 2 circles (10, 11) / 4 teams (100, 101, 110, 111)
pub fn sample_tree() -> OrgTree {
    OrgTree {
        account_id: ACCOUNT_ID,
        roots: vec![OrgTreeNode {
            node: node(1, OrgLevel::SuperCircle, None),
            children: vec![
                OrgTreeNode {
                    node: node(10, OrgLevel::Circle, Some(1)),
                    children: vec![team(100, 10), team(101, 10)],
                },
                OrgTreeNode {
                    node: node(11, OrgLevel::Circle, Some(1)),
                    children: vec![team(110, 11), team(111, 11)],
                },
            ],
        }],
    }
}

/// Engine configuration matching the fixtures in this module
pub fn engine_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.allowed_business_functions = [
        "handleCalls",
        "transferCalls",
        "viewReports",
        "manageQueues",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    config.allowed_roles = ["agent", "supervisor", "customer", "internalService"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    config.team_level_functions = ["handleCalls", "transferCalls"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    config
}

pub fn grant(
    function: &str,
    role: &str,
    scope: Scope,
    org_id: Option<OrgNodeId>,
) -> PermissionGrant {
    PermissionGrant {
        account_friendly_name: ACCOUNT_NAME.to_string(),
        business_function: function.to_string(),
        role: role.to_string(),
        scope,
        org_id,
    }
}

pub fn setting_override(org_id: OrgNodeId, key: &str, value: &str) -> SettingOverride {
    SettingOverride {
        id: Uuid::new_v4(),
        org_id,
        key: key.to_string(),
        value: value.to_string(),
        account_id: ACCOUNT_ID,
        capabilities: Default::default(),
        enabled: true,
    }
}

pub fn account_setting(key: &str, value: &str) -> AccountSetting {
    AccountSetting {
        id: Uuid::new_v4(),
        key: key.to_string(),
        value: value.to_string(),
        account_id: ACCOUNT_ID,
    }
}

pub fn caller_with_scope(scope: Scope) -> CallerDescriptor {
    CallerDescriptor {
        active_roles: ["agent"].iter().map(|s| s.to_string()).collect(),
        restrictions: vec![Restriction {
            team_id: 100,
            circle_id: 10,
            super_circle_id: 1,
            scope,
            preferred: true,
        }],
    }
}

/// Store double whose `delete_grant` always fails, for exercising the
/// evict-regardless-of-outcome contract
pub struct FailingDeleteStore {
    pub inner: Arc<MemoryStore>,
}

#[async_trait]
impl ConfigStore for FailingDeleteStore {
    async fn load_setting_overrides(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<SettingOverride>> {
        self.inner.load_setting_overrides(account_id).await
    }

    async fn load_account_settings(&self, account_id: AccountId) -> Result<Vec<AccountSetting>> {
        self.inner.load_account_settings(account_id).await
    }

    async fn load_platform_settings(
        &self,
    ) -> Result<Vec<orgcfg_rs::core::settings::PlatformSetting>> {
        self.inner.load_platform_settings().await
    }

    async fn load_grants(&self, account_friendly_name: &str) -> Result<Vec<PermissionGrant>> {
        self.inner.load_grants(account_friendly_name).await
    }

    async fn load_org_tree(&self, account_id: AccountId) -> Result<OrgTree> {
        self.inner.load_org_tree(account_id).await
    }

    async fn save_grant(&self, account_id: AccountId, grant: &PermissionGrant) -> Result<()> {
        self.inner.save_grant(account_id, grant).await
    }

    async fn delete_grant(&self, _account_id: AccountId, _grant: &PermissionGrant) -> Result<()> {
        Err(EngineError::persistence("delete refused by test double"))
    }

    async fn save_setting_override(&self, setting: &SettingOverride) -> Result<OrgNodeId> {
        self.inner.save_setting_override(setting).await
    }
}
