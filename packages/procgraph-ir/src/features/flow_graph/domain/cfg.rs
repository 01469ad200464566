//! Control Flow Graph of one procedure
//!
//! Statement-level graph: every labeled statement, condition and case is a
//! node, bracketed by the synthetic `Start` and `Stop` nodes.

use serde::{Deserialize, Serialize};

use crate::shared::models::{EdgeSet, EdgeStyle, GraphSummary, NodeLabel, START_LABEL, STOP_LABEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlFlowGraph {
    pub procedure: String,
    edges: EdgeSet,
}

impl ControlFlowGraph {
    pub fn new(procedure: impl Into<String>, edges: EdgeSet) -> Self {
        Self {
            procedure: procedure.into(),
            edges,
        }
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn start(&self) -> NodeLabel {
        NodeLabel::start()
    }

    pub fn stop(&self) -> NodeLabel {
        NodeLabel::stop()
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(source, target, EdgeStyle::Control)
    }

    pub fn successors(&self, label: &str) -> Vec<&NodeLabel> {
        self.edges.successors(label, Some(EdgeStyle::Control))
    }

    pub fn predecessors(&self, label: &str) -> Vec<&NodeLabel> {
        self.edges.predecessors(label, Some(EdgeStyle::Control))
    }

    /// Nodes in first-seen order (`Start` first)
    pub fn nodes(&self) -> impl Iterator<Item = &NodeLabel> + '_ {
        self.edges.nodes()
    }

    /// Nodes flowing directly into `Stop`
    pub fn exits(&self) -> Vec<&NodeLabel> {
        self.predecessors(STOP_LABEL)
    }

    /// Labeled nodes lacking an outgoing edge (always empty for a built graph)
    pub fn dead_ends(&self) -> Vec<&NodeLabel> {
        self.nodes()
            .filter(|n| n.as_str() != STOP_LABEL && self.successors(n.as_str()).is_empty())
            .collect()
    }

    /// Labeled nodes lacking an incoming edge (always empty for a built graph)
    pub fn orphans(&self) -> Vec<&NodeLabel> {
        self.nodes()
            .filter(|n| n.as_str() != START_LABEL && self.predecessors(n.as_str()).is_empty())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.edges.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary::of(&self.edges)
    }
}
