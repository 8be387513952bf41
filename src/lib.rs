//! # orgcfg-rs
//!
//! Hierarchical configuration and permission resolution engine for
//! multi-tenant contact-center platforms.
//!
//! ## Features
//!
//! - **Settings cascade**: organisation-node overrides resolved
//!   team-first through the team → circle → super-circle chain, with
//!   account and platform settings as sibling tiers
//! - **Permission reduction**: business-function grants filtered to a
//!   caller's active roles and reduced to the widest scope per
//!   (function, organisation) pair
//! - **Visibility pruning**: organisation trees restricted to the
//!   subtree a caller's maximum scope permits
//! - **Cache-aside reads**: per-account keyed cache with compute-on-miss
//!   suppliers, bypass support, and invalidate-on-write
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use orgcfg_rs::config::EngineConfig;
//! use orgcfg_rs::core::cache::CachePolicy;
//! use orgcfg_rs::services::{DirectoryService, PermissionService, SettingsService};
//! use orgcfg_rs::storage::memory::{MemoryAuditSink, MemoryStore};
//! use orgcfg_rs::PermissionEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::from_file("config/engine.yaml").await?;
//!     let policy = CachePolicy::from(&config.cache);
//!
//!     let store = Arc::new(MemoryStore::new());
//!     let audit = Arc::new(MemoryAuditSink::new());
//!
//!     let directory = Arc::new(DirectoryService::new(store.clone(), policy));
//!     let settings = SettingsService::new(store.clone(), directory.clone(), policy);
//!     let permissions = PermissionService::new(
//!         store,
//!         audit,
//!         PermissionEngine::new(config),
//!         policy,
//!     );
//!
//!     let effective = settings.effective_settings_for_team(7, 100, false).await?;
//!     println!("{} org settings", effective.org_settings.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::EngineConfig;
pub use utils::error::{EngineError, Result};

pub use crate::core::org::{
    AccountId, AncestorChain, CallerDescriptor, CallerKind, OrgLevel, OrgNode, OrgNodeId, OrgTree,
    OrgTreeNode, Restriction,
};
pub use crate::core::permissions::{
    GrantDiff, PermissionEngine, PermissionGrant, PermissionsResponse, diff_grants,
    filter_allowed, reduce_to_max_scope,
};
pub use crate::core::scope::{Scope, max_scope};
pub use crate::core::settings::{
    AccountSetting, EffectiveSettings, PlatformSetting, SettingOverride, resolve,
};
pub use crate::core::visibility::prune;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
