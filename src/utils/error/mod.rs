//! Error handling for the engine
//!
//! All engine operations return [`Result`] with a typed, distinguishable
//! [`EngineError`]. Errors propagate to the caller unmodified; nothing is
//! caught and silently downgraded inside the engine.

mod types;


pub use types::{EngineError, Result};
