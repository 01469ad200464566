//! PDG (Program Dependence Graph) Feature
//!
//! Control dependence from syntactic nesting, data dependence from scoped
//! def-use resolution with loop back-patching.
//!
//! ## Structure
//! - `domain/` - Scope arena, DependencyType
//! - `ports/` - DependenceAnalyzer trait
//! - `application/` - BuildPdgUseCase
//! - `infrastructure/` - PdgBuilder, ProgramDependenceGraph (slicing), PdgAnalyzer

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::BuildPdgUseCase;
pub use domain::DependencyType;
pub use infrastructure::{PdgAnalyzer, PdgBuilder, PdgOptions, ProgramDependenceGraph};
pub use ports::DependenceAnalyzer;
