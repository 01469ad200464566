pub mod cfg;
mod record;

pub use cfg::ControlFlowGraph;
pub use record::{ControlRecord, RecordKind};
