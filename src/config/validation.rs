//! Configuration validation

use super::models::EngineConfig;
use crate::utils::error::{EngineError, Result};

impl EngineConfig {
    /// Validate the configuration before handing it to the engine
    pub fn validate(&self) -> Result<()> {
        if self.allowed_business_functions.is_empty() {
            return Err(EngineError::config(
                "allowed_business_functions must not be empty",
            ));
        }
        if self.allowed_roles.is_empty() {
            return Err(EngineError::config("allowed_roles must not be empty"));
        }
        if self.system_tooling.business_function.is_empty() {
            return Err(EngineError::config(
                "system_tooling.business_function must not be empty",
            ));
        }
        if self.system_tooling.role.is_empty() {
            return Err(EngineError::config("system_tooling.role must not be empty"));
        }
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(EngineError::config(
                "cache.ttl_secs must be greater than 0 when caching is enabled",
            ));
        }
        Ok(())
    }
}
