//! Flow Graph Feature
//!
//! Statement-level control flow graph of one procedure.
//!
//! ## Structure
//! - `domain/` - ControlFlowGraph and the open control records of the walk
//! - `ports/` - FlowAnalyzer trait
//! - `application/` - BuildFlowGraphUseCase
//! - `infrastructure/` - CfgBuilder / CfgAnalyzer

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::BuildFlowGraphUseCase;
pub use domain::ControlFlowGraph;
pub use infrastructure::{CfgAnalyzer, CfgBuilder};
pub use ports::FlowAnalyzer;
