//! Data edge colours
//!
//! Every definition node gets its own colour so independent def-use chains
//! stay visually apart. Assignment is round-robin in first-seen order, so the
//! same graph always renders the same way.

use rustc_hash::FxHashMap;

use crate::shared::models::NodeLabel;

/// X11 colour names understood by Graphviz
pub const X11_PALETTE: [&str; 18] = [
    "DarkGray",
    "Red",
    "Maroon",
    "yellow3",
    "Olive",
    "limegreen",
    "Green",
    "DarkCyan",
    "Teal",
    "Blue",
    "Navy",
    "Fuchsia",
    "Purple",
    "plum",
    "paleturquoise4",
    "orange",
    "orangered4",
    "tan4",
];

#[derive(Debug, Default)]
pub struct DataPalette {
    assigned: FxHashMap<NodeLabel, &'static str>,
}

impl DataPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour of a source node, assigning the next one on first sight
    pub fn colour_for(&mut self, source: &NodeLabel) -> &'static str {
        let next = X11_PALETTE[self.assigned.len() % X11_PALETTE.len()];
        *self.assigned.entry(source.clone()).or_insert(next)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
