//! Parsing Feature
//!
//! Turns Java source into the closed procedure AST.
//!
//! ## Structure
//! - `domain/` - Procedure / Stmt / Expr and their source rendering
//! - `ports/` - ProcedureSource trait
//! - `application/` - ExtractProceduresUseCase
//! - `infrastructure/` - tree-sitter-java lowering

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::ExtractProceduresUseCase;
pub use domain::{Expr, Procedure, SkippedProcedure, Stmt, SwitchEntry};
pub use infrastructure::JavaLowering;
pub use ports::ProcedureSource;
