/*
 * Edge Set
 *
 * Directed, label-addressed edge set shared by the CFG and the PDG.
 *
 * - petgraph storage (edge iteration follows insertion order)
 * - idempotent insertion on the exact (source, target, style) triple
 * - O(1) label -> NodeIndex lookup
 */

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::label::NodeLabel;

/// Edge kind-specific style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeStyle {
    /// Execution order (CFG) or control dependence (PDG)
    Control,
    /// Data dependence (PDG only)
    Data,
}

impl EdgeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStyle::Control => "CONTROL",
            EdgeStyle::Data => "DATA",
        }
    }
}

/// Borrowed view of one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge<'a> {
    pub source: &'a NodeLabel,
    pub target: &'a NodeLabel,
    pub style: EdgeStyle,
}

/// Set of directed labeled edges
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    graph: DiGraph<NodeLabel, EdgeStyle>,
    index: FxHashMap<NodeLabel, NodeIndex>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node without edges (get-or-insert)
    pub fn add_node(&mut self, label: &NodeLabel) -> NodeIndex {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.clone());
        self.index.insert(label.clone(), idx);
        idx
    }

    /// Insert an edge. Returns false when the identical edge already exists.
    pub fn insert(&mut self, source: &NodeLabel, target: &NodeLabel, style: EdgeStyle) -> bool {
        let from = self.add_node(source);
        let to = self.add_node(target);

        if self
            .graph
            .edges_connecting(from, to)
            .any(|e| *e.weight() == style)
        {
            return false;
        }

        self.graph.add_edge(from, to, style);
        true
    }

    pub fn contains(&self, source: &str, target: &str, style: EdgeStyle) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&from), Some(&to)) => self
                .graph
                .edges_connecting(from, to)
                .any(|e| *e.weight() == style),
            _ => false,
        }
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn index_of(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.graph.edge_references().map(move |e| Edge {
            source: &self.graph[e.source()],
            target: &self.graph[e.target()],
            style: *e.weight(),
        })
    }

    /// Edges of one style in insertion order
    pub fn edges_with_style(&self, style: EdgeStyle) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.edges().filter(move |e| e.style == style)
    }

    /// Nodes in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeLabel> + '_ {
        self.graph.node_weights()
    }

    /// Direct successors, optionally restricted to one style
    pub fn successors(&self, label: &str, style: Option<EdgeStyle>) -> Vec<&NodeLabel> {
        self.neighbors(label, style, Direction::Outgoing)
    }

    /// Direct predecessors, optionally restricted to one style
    pub fn predecessors(&self, label: &str, style: Option<EdgeStyle>) -> Vec<&NodeLabel> {
        self.neighbors(label, style, Direction::Incoming)
    }

    fn neighbors(
        &self,
        label: &str,
        style: Option<EdgeStyle>,
        direction: Direction,
    ) -> Vec<&NodeLabel> {
        let Some(&idx) = self.index.get(label) else {
            return Vec::new();
        };

        let mut out: Vec<&NodeLabel> = self
            .graph
            .edges_directed(idx, direction)
            .filter(|e| style.map_or(true, |s| *e.weight() == s))
            .map(|e| match direction {
                Direction::Outgoing => &self.graph[e.target()],
                Direction::Incoming => &self.graph[e.source()],
            })
            .collect();
        // petgraph yields adjacency in reverse insertion order
        out.reverse();
        out.dedup();
        out
    }

    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn count(&self, style: EdgeStyle) -> usize {
        self.graph.edge_weights().filter(|w| **w == style).count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub(crate) fn graph(&self) -> &DiGraph<NodeLabel, EdgeStyle> {
        &self.graph
    }
}

/// Serializable edge list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeLabel,
    pub target: NodeLabel,
    pub style: EdgeStyle,
}

impl Serialize for EdgeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let records: Vec<EdgeRecord> = self
            .edges()
            .map(|e| EdgeRecord {
                source: e.source.clone(),
                target: e.target.clone(),
                style: e.style,
            })
            .collect();
        records.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EdgeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<EdgeRecord>::deserialize(deserializer)?;
        let mut set = EdgeSet::new();
        for r in records {
            set.insert(&r.source, &r.target, r.style);
        }
        Ok(set)
    }
}
