//! Shared test infrastructure

pub mod fixtures;
