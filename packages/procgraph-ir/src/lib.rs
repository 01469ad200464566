/*
 * Procgraph IR - Control flow and program dependence graphs per procedure
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (NodeLabel, EdgeSet, GraphSummary)
 * - features/    : Vertical slices (parsing → flow_graph → pdg → graph_render)
 * - pipeline/    : Orchestration
 * - config/      : Presets + YAML overrides
 *
 * Performance:
 * - Procedures are independent; Rayon fans them out when `parallel` is on
 */

#![allow(clippy::upper_case_acronyms)] // CFG, PDG naming
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (parsing, flow graph, PDG, rendering)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, DataEdgeStyle, Preset};
pub use errors::{AnalysisError, LoweringError, ProcgraphError, Result};
pub use features::flow_graph::{CfgBuilder, ControlFlowGraph};
pub use features::graph_render::{wrap_digraph, DotEmitter};
pub use features::parsing::{JavaLowering, Procedure};
pub use features::pdg::{DependencyType, PdgBuilder, ProgramDependenceGraph};
pub use pipeline::{process_java_source, ProcedureGraphs, ProcessResult};
pub use shared::models::{EdgeSet, EdgeStyle, NodeLabel};
