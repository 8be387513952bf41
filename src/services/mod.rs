//! Orchestration services
//!
//! Request-scoped services wiring the core algorithms to the storage and
//! audit boundaries through per-account cache-aside stores. All state
//! between calls lives in the shared cache and the backing store; the
//! services themselves hold no request state.

mod directory;
mod permissions;
mod settings;

pub use directory::DirectoryService;
pub use permissions::PermissionService;
pub use settings::SettingsService;
