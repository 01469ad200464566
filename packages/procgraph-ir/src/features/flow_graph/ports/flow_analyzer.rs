use crate::errors::Result;
use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::parsing::domain::Procedure;

pub trait FlowAnalyzer: Send + Sync {
    fn build_cfg(&self, procedure: &Procedure) -> Result<ControlFlowGraph>;
}
