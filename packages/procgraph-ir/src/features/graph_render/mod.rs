//! Graph Render Feature
//!
//! DOT text for built graphs and an optional external Graphviz renderer.
//!
//! ## Structure
//! - `domain/` - data edge palette
//! - `ports/` - GraphRenderer trait
//! - `application/` - RenderGraphUseCase
//! - `infrastructure/` - DotEmitter, DotCommandRenderer

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::RenderGraphUseCase;
pub use infrastructure::{wrap_digraph, DotCommandRenderer, DotEmitter};
pub use ports::GraphRenderer;
