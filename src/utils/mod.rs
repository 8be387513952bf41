//! Utility modules for the engine

pub mod error;

pub use error::{EngineError, Result};
