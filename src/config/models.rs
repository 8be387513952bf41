//! Configuration model definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The synthetic grant every employee response carries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemToolingConfig {
    /// Fixed business function name
    #[serde(default = "default_system_tooling_function")]
    pub business_function: String,
    /// Fixed role the grant is attributed to
    #[serde(default = "default_system_tooling_role")]
    pub role: String,
}

impl Default for SystemToolingConfig {
    fn default() -> Self {
        Self {
            business_function: default_system_tooling_function(),
            role: default_system_tooling_role(),
        }
    }
}

/// Fixed role string per non-employee principal kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonEmployeeRoleMap {
    /// Customer with an authenticated session
    #[serde(default = "default_customer_authenticated_role")]
    pub customer_authenticated: String,
    /// Customer without an authenticated session
    #[serde(default = "default_customer_unauthenticated_role")]
    pub customer_unauthenticated: String,
    /// First-party platform service
    #[serde(default = "default_internal_service_role")]
    pub internal_service: String,
    /// Third-party integration service
    #[serde(default = "default_foreign_service_role")]
    pub foreign_service: String,
}

impl Default for NonEmployeeRoleMap {
    fn default() -> Self {
        Self {
            customer_authenticated: default_customer_authenticated_role(),
            customer_unauthenticated: default_customer_unauthenticated_role(),
            internal_service: default_internal_service_role(),
            foreign_service: default_foreign_service_role(),
        }
    }
}

/// Cache behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Enable caching; disabled means every read bypasses
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Entry TTL in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Top-level engine configuration for one deployment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Business functions an account may grant
    #[serde(default)]
    pub allowed_business_functions: HashSet<String>,
    /// Roles an account may attach grants to
    #[serde(default)]
    pub allowed_roles: HashSet<String>,
    /// Business functions eligible for node-scoped (team-level) grants
    #[serde(default)]
    pub team_level_functions: HashSet<String>,
    /// Synthetic system-tooling grant
    #[serde(default)]
    pub system_tooling: SystemToolingConfig,
    /// Non-employee principal-kind role mapping
    #[serde(default)]
    pub non_employee_roles: NonEmployeeRoleMap,
    /// Cache behaviour
    #[serde(default)]
    pub cache: CacheSettings,
}

fn default_system_tooling_function() -> String {
    "systemTooling".to_string()
}

fn default_system_tooling_role() -> String {
    "platformOperator".to_string()
}

fn default_customer_authenticated_role() -> String {
    "customer".to_string()
}

fn default_customer_unauthenticated_role() -> String {
    "anonymousCustomer".to_string()
}

fn default_internal_service_role() -> String {
    "internalService".to_string()
}

fn default_foreign_service_role() -> String {
    "foreignService".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    300
}
