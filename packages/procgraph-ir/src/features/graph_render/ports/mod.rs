//! Rendering port

use crate::errors::Result;

/// Turns a complete `digraph` document into an output artifact (pdf, svg, ...)
pub trait GraphRenderer: Send + Sync {
    fn render(&self, dot: &str) -> Result<Vec<u8>>;

    /// Output format name, used as the file extension
    fn format(&self) -> &str;
}
