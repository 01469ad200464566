//! Java source -> per-procedure CFG / PDG
//!
//! Lowering runs once per file; every accepted procedure then gets its own
//! fresh builders, so procedures can be analysed in parallel.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::flow_graph::{BuildFlowGraphUseCase, CfgAnalyzer};
use crate::features::graph_render::DotEmitter;
use crate::features::parsing::domain::Procedure;
use crate::features::parsing::{ExtractProceduresUseCase, JavaLowering};
use crate::features::pdg::{BuildPdgUseCase, PdgAnalyzer};

use super::types::{ProcedureGraphs, ProcessResult};

/// Analyse every procedure of a Java compilation unit.
///
/// Procedures using constructs outside the supported subset are reported in
/// `skipped`; a syntax error or an exceeded node limit fails the whole call.
pub fn process_java_source(source: &str, config: &AnalysisConfig) -> Result<ProcessResult> {
    config.validate()?;

    let extract = ExtractProceduresUseCase::new(JavaLowering::new());
    let (procedures, skipped) = extract.execute_partitioned(source)?;

    for s in &skipped {
        tracing::warn!("skipping {} (line {}): {}", s.name, s.line, s.error);
    }

    let graphs = analyse_all(&procedures, config)?;

    tracing::info!(
        "analysed {} procedures ({} skipped)",
        graphs.len(),
        skipped.len()
    );
    Ok(ProcessResult {
        procedures: graphs,
        skipped,
    })
}

/// Build the enabled graphs of one procedure and their DOT bodies
pub fn process_procedure(procedure: &Procedure, config: &AnalysisConfig) -> Result<ProcedureGraphs> {
    let emitter = DotEmitter::from_config(config);

    let cfg = if config.cfg.enabled {
        let use_case = BuildFlowGraphUseCase::new(CfgAnalyzer::new(config.cfg.clone()));
        Some(use_case.execute(procedure)?)
    } else {
        None
    };

    let pdg = if config.pdg.enabled {
        let use_case = BuildPdgUseCase::new(PdgAnalyzer::new(config.pdg.clone()));
        Some(use_case.execute(procedure)?)
    } else {
        None
    };

    Ok(ProcedureGraphs {
        name: procedure.name.clone(),
        cfg_dot: cfg.as_ref().map(|g| emitter.emit_cfg(g)),
        pdg_dot: pdg.as_ref().map(|g| emitter.emit_pdg(g)),
        cfg,
        pdg,
    })
}

#[cfg(feature = "parallel")]
fn analyse_all(procedures: &[Procedure], config: &AnalysisConfig) -> Result<Vec<ProcedureGraphs>> {
    if !config.parallel {
        return analyse_sequential(procedures, config);
    }
    procedures
        .par_iter()
        .map(|p| process_procedure(p, config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn analyse_all(procedures: &[Procedure], config: &AnalysisConfig) -> Result<Vec<ProcedureGraphs>> {
    analyse_sequential(procedures, config)
}

fn analyse_sequential(
    procedures: &[Procedure],
    config: &AnalysisConfig,
) -> Result<Vec<ProcedureGraphs>> {
    procedures
        .iter()
        .map(|p| process_procedure(p, config))
        .collect()
}
