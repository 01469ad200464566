//! Pipeline orchestration
//!
//! Source text in, per-procedure graphs and DOT bodies out.

pub mod processor;

pub use processor::{
    process_java_source, process_procedure, ProcedureGraphs, ProcedureSummary, ProcessResult,
};
