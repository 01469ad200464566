//! Process result types

use serde::Serialize;

use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::parsing::domain::SkippedProcedure;
use crate::features::pdg::infrastructure::ProgramDependenceGraph;
use crate::shared::models::GraphSummary;

/// Graphs and DOT bodies of one analysed procedure.
///
/// A graph is `None` when its stage is disabled in the configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ProcedureGraphs {
    pub name: String,
    pub cfg: Option<ControlFlowGraph>,
    pub pdg: Option<ProgramDependenceGraph>,
    pub cfg_dot: Option<String>,
    pub pdg_dot: Option<String>,
}

impl ProcedureGraphs {
    pub fn summary(&self) -> ProcedureSummary {
        ProcedureSummary {
            name: self.name.clone(),
            cfg: self.cfg.as_ref().map(|g| g.summary()),
            pdg: self.pdg.as_ref().map(|g| g.summary()),
        }
    }
}

/// Node and edge counts of one procedure, for JSON export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureSummary {
    pub name: String,
    pub cfg: Option<GraphSummary>,
    pub pdg: Option<GraphSummary>,
}

/// Result of analysing one source file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessResult {
    pub procedures: Vec<ProcedureGraphs>,
    pub skipped: Vec<SkippedProcedure>,
}

impl ProcessResult {
    pub fn procedure(&self, name: &str) -> Option<&ProcedureGraphs> {
        self.procedures.iter().find(|p| p.name == name)
    }

    pub fn summaries(&self) -> Vec<ProcedureSummary> {
        self.procedures.iter().map(|p| p.summary()).collect()
    }

    pub fn summaries_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.summaries())
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty() && self.skipped.is_empty()
    }
}
