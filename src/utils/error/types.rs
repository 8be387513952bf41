//! Error types for the engine

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Referenced organisation node, setting, or grant does not exist
    /// for the caller's account
    #[error("Not found: {0}")]
    NotFound(String),

    /// Desired grant names a business function outside the account's
    /// configured allow-list
    #[error("Invalid business function: {0}")]
    InvalidBusinessFunction(String),

    /// Desired grant names a role outside the configured role allow-list
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Node-scoped grants exist but none of their business functions are
    /// eligible at team level
    #[error("Team-level grant not permitted: {0}")]
    TeamLevelNotPermitted(String),

    /// Generic validation failure
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller's account does not match the resource's account
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Opaque failure from the storage boundary; never retried here
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error maps to a client-side bad request
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidBusinessFunction(_)
                | Self::InvalidRole(_)
                | Self::TeamLevelNotPermitted(_)
                | Self::Validation(_)
        )
    }
}
