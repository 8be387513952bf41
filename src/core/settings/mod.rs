//! Cascading settings resolution across the organisation hierarchy
//!
//! Organisation-node overrides cascade team-first through the team →
//! circle → super-circle chain. Account and platform settings form a
//! sibling tier returned alongside the cascade, never merged into it.

mod resolver;
mod types;


pub use resolver::resolve;
pub use types::{AccountSetting, Capability, EffectiveSettings, PlatformSetting, SettingOverride};
