//! Parsing application layer

mod extract_procedures;

pub use extract_procedures::ExtractProceduresUseCase;
