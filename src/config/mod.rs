//! Engine configuration
//!
//! Allow-lists and fixed grant constants are configuration values
//! injected at construction, not compile-time singletons, so embedders
//! and tests can override them.

mod models;
mod validation;


pub use models::{CacheSettings, EngineConfig, NonEmployeeRoleMap, SystemToolingConfig};

use crate::utils::error::{EngineError, Result};
use std::path::Path;
use tracing::{debug, info};

impl EngineConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading engine configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EngineError::config(format!("Failed to read config file: {e}")))?;

        let config: EngineConfig = serde_yaml::from_str(&content)
            .map_err(|e| EngineError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;

        debug!("Engine configuration loaded successfully");
        Ok(config)
    }
}
