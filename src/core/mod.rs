//! Core resolution engine
//!
//! The four tightly coupled pieces of the engine: the scope model, the
//! settings cascade, the permission reducer, and the visibility pruner,
//! plus the cache-aside store that keeps their reads fast.

pub mod cache;
pub mod org;
pub mod permissions;
pub mod scope;
pub mod settings;
pub mod visibility;
