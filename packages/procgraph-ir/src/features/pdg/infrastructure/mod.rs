//! PDG infrastructure

pub mod pdg;
pub mod pdg_builder;

pub use pdg::{ProgramDependenceGraph, RankMap};
pub use pdg_builder::{PdgBuilder, PdgOptions};

use crate::config::PdgConfig;
use crate::errors::Result;
use crate::features::parsing::domain::Procedure;
use crate::features::pdg::ports::DependenceAnalyzer;
use crate::shared::NodeLabeler;

/// Builds one PDG per call with a fresh builder
#[derive(Debug, Clone, Default)]
pub struct PdgAnalyzer {
    config: PdgConfig,
}

impl PdgAnalyzer {
    pub fn new(config: PdgConfig) -> Self {
        Self { config }
    }
}

impl DependenceAnalyzer for PdgAnalyzer {
    fn build_pdg(&self, procedure: &Procedure) -> Result<ProgramDependenceGraph> {
        let builder = PdgBuilder::with_labeler(NodeLabeler::with_limit(self.config.max_nodes))
            .with_options(PdgOptions {
                include_control: self.config.include_control,
                include_data: self.config.include_data,
            });
        Ok(builder.build(procedure)?)
    }
}
