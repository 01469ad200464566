//! Shared module - Common types and utilities
//!
//! Types used by both graph builders and the emitter. Nothing in here knows
//! about a particular source language.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::node_labeler::NodeLabeler;
pub use utils::scope_stack::ScopeStack;
