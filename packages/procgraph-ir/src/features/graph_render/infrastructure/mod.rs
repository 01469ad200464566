//! Graph rendering infrastructure

pub mod dot_command;
pub mod dot_emitter;

pub use dot_command::DotCommandRenderer;
pub use dot_emitter::{wrap_digraph, DotEmitter};
