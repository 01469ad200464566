//! Utility modules shared across features
//!
//! - `node_labeler`: sequential `"(n) text"` node labels
//! - `scope_stack`: enclosing type names for qualified procedure names
//! - `tree_sitter`: syntax tree accessors

pub mod node_labeler;
pub mod scope_stack;
pub mod tree_sitter;

pub use node_labeler::{escape_quotes, NodeLabeler};
pub use scope_stack::ScopeStack;
