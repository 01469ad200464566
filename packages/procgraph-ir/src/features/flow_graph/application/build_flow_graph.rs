use crate::errors::Result;
use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::flow_graph::ports::FlowAnalyzer;
use crate::features::parsing::domain::Procedure;

pub struct BuildFlowGraphUseCase<A: FlowAnalyzer> {
    analyzer: A,
}

impl<A: FlowAnalyzer> BuildFlowGraphUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn execute(&self, procedure: &Procedure) -> Result<ControlFlowGraph> {
        self.analyzer.build_cfg(procedure)
    }

    /// One graph per procedure, stopping at the first failure
    pub fn execute_all(&self, procedures: &[Procedure]) -> Result<Vec<ControlFlowGraph>> {
        procedures.iter().map(|p| self.execute(p)).collect()
    }
}
