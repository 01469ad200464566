//! PDG Ports

use crate::errors::Result;
use crate::features::parsing::domain::Procedure;
use crate::features::pdg::infrastructure::ProgramDependenceGraph;

/// Builds the program dependence graph of one procedure
pub trait DependenceAnalyzer: Send + Sync {
    fn build_pdg(&self, procedure: &Procedure) -> Result<ProgramDependenceGraph>;
}
