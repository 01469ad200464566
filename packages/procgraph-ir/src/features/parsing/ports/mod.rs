//! Parsing ports (interfaces)

mod procedure_source;

pub use procedure_source::ProcedureSource;
