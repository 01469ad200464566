//! Shared models

mod edge_set;
mod label;
mod summary;

pub use edge_set::{Edge, EdgeRecord, EdgeSet, EdgeStyle};
pub use label::{NodeLabel, ENTRY_LABEL, START_LABEL, STOP_LABEL};
pub use summary::GraphSummary;
