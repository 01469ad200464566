//! Processor module
//!
//! - `types`: ProcessResult, ProcedureGraphs, ProcedureSummary
//! - `main`: entry points

mod main;
pub mod types;

pub use main::{process_java_source, process_procedure};
pub use types::{ProcedureGraphs, ProcedureSummary, ProcessResult};
