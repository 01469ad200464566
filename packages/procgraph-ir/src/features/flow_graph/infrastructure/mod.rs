//! Flow Graph infrastructure

pub mod cfg_builder;

pub use cfg_builder::CfgBuilder;

use crate::config::CfgConfig;
use crate::errors::Result;
use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::flow_graph::ports::FlowAnalyzer;
use crate::features::parsing::domain::Procedure;
use crate::shared::NodeLabeler;

/// Builds one CFG per call with a fresh builder
#[derive(Debug, Clone, Default)]
pub struct CfgAnalyzer {
    config: CfgConfig,
}

impl CfgAnalyzer {
    pub fn new(config: CfgConfig) -> Self {
        Self { config }
    }
}

impl FlowAnalyzer for CfgAnalyzer {
    fn build_cfg(&self, procedure: &Procedure) -> Result<ControlFlowGraph> {
        let builder = CfgBuilder::with_labeler(NodeLabeler::with_limit(self.config.max_nodes));
        Ok(builder.build(procedure)?)
    }
}
