/*
 * PDG (Program Dependence Graph)
 *
 * Control edges follow syntactic nesting (Entry -> statement, construct ->
 * nested statement); data edges run from a definition to every node that
 * reads it.
 *
 * Slicing:
 * - Backward / forward BFS with dependency filtering
 * - Thin slices (data only), chops
 */

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::features::pdg::domain::DependencyType;
use crate::shared::models::{Edge, EdgeSet, EdgeStyle, GraphSummary, NodeLabel, ENTRY_LABEL};

/// Labels grouped by nesting depth (`Entry` is depth 0)
pub type RankMap = BTreeMap<usize, Vec<NodeLabel>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDependenceGraph {
    pub procedure: String,
    edges: EdgeSet,
    ranks: RankMap,
}

impl ProgramDependenceGraph {
    pub fn new(procedure: impl Into<String>, edges: EdgeSet, ranks: RankMap) -> Self {
        Self {
            procedure: procedure.into(),
            edges,
            ranks,
        }
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn ranks(&self) -> &RankMap {
        &self.ranks
    }

    pub fn entry(&self) -> NodeLabel {
        NodeLabel::entry()
    }

    /// Nesting depth a label was first visited at
    pub fn depth_of(&self, label: &str) -> Option<usize> {
        self.ranks
            .iter()
            .find(|(_, labels)| labels.iter().any(|l| l.as_str() == label))
            .map(|(depth, _)| *depth)
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.edges.contains_node(label)
    }

    pub fn has_control_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(source, target, EdgeStyle::Control)
    }

    pub fn has_data_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(source, target, EdgeStyle::Data)
    }

    pub fn control_edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.edges.edges_with_style(EdgeStyle::Control)
    }

    pub fn data_edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.edges.edges_with_style(EdgeStyle::Data)
    }

    /// Controlling construct of a node (`None` for `Entry`)
    pub fn control_parent(&self, label: &str) -> Option<&NodeLabel> {
        self.edges
            .predecessors(label, Some(EdgeStyle::Control))
            .into_iter()
            .next()
    }

    /// Sources of incoming edges (what `label` depends on)
    pub fn dependencies(&self, label: &str, kind: DependencyType) -> Vec<&NodeLabel> {
        let mut out = Vec::new();
        if kind.includes_control() {
            out.extend(self.edges.predecessors(label, Some(EdgeStyle::Control)));
        }
        if kind.includes_data() {
            out.extend(self.edges.predecessors(label, Some(EdgeStyle::Data)));
        }
        out
    }

    /// Targets of outgoing edges (what depends on `label`)
    pub fn dependents(&self, label: &str, kind: DependencyType) -> Vec<&NodeLabel> {
        let mut out = Vec::new();
        if kind.includes_control() {
            out.extend(self.edges.successors(label, Some(EdgeStyle::Control)));
        }
        if kind.includes_data() {
            out.extend(self.edges.successors(label, Some(EdgeStyle::Data)));
        }
        out
    }

    /// Backward slice: every node `target` transitively depends on
    pub fn backward_slice(&self, target: &str, max_depth: Option<usize>) -> FxHashSet<NodeLabel> {
        self.backward_slice_filtered(target, max_depth, DependencyType::Both)
    }

    pub fn backward_slice_filtered(
        &self,
        target: &str,
        max_depth: Option<usize>,
        kind: DependencyType,
    ) -> FxHashSet<NodeLabel> {
        self.traverse(target, max_depth, |label| self.dependencies(label, kind))
    }

    /// Thin slice: backward slice over data dependencies only
    pub fn thin_slice(&self, target: &str, max_depth: Option<usize>) -> FxHashSet<NodeLabel> {
        self.backward_slice_filtered(target, max_depth, DependencyType::Data)
    }

    /// Forward slice: every node transitively depending on `source`
    pub fn forward_slice(&self, source: &str, max_depth: Option<usize>) -> FxHashSet<NodeLabel> {
        self.forward_slice_filtered(source, max_depth, DependencyType::Both)
    }

    pub fn forward_slice_filtered(
        &self,
        source: &str,
        max_depth: Option<usize>,
        kind: DependencyType,
    ) -> FxHashSet<NodeLabel> {
        self.traverse(source, max_depth, |label| self.dependents(label, kind))
    }

    /// Union of backward and forward slices
    pub fn hybrid_slice(&self, focus: &str, max_depth: Option<usize>) -> FxHashSet<NodeLabel> {
        let mut slice = self.backward_slice(focus, max_depth);
        slice.extend(self.forward_slice(focus, max_depth));
        slice
    }

    /// Chop: `backward_slice(target) ∩ forward_slice(source)`
    pub fn chop(&self, source: &str, target: &str, max_depth: Option<usize>) -> FxHashSet<NodeLabel> {
        self.chop_filtered(source, target, max_depth, DependencyType::Both)
    }

    pub fn chop_filtered(
        &self,
        source: &str,
        target: &str,
        max_depth: Option<usize>,
        kind: DependencyType,
    ) -> FxHashSet<NodeLabel> {
        let backward = self.backward_slice_filtered(target, max_depth, kind);
        let forward = self.forward_slice_filtered(source, max_depth, kind);
        backward.intersection(&forward).cloned().collect()
    }

    fn traverse<'a, F>(&'a self, start: &str, max_depth: Option<usize>, next: F) -> FxHashSet<NodeLabel>
    where
        F: Fn(&str) -> Vec<&'a NodeLabel>,
    {
        let max_depth = max_depth.unwrap_or(usize::MAX);
        let mut visited: FxHashSet<NodeLabel> = FxHashSet::default();
        let mut worklist: VecDeque<(NodeLabel, usize)> = VecDeque::new();

        let Some(index) = self.edges.index_of(start) else {
            return visited;
        };
        if let Some(label) = self.edges.graph().node_weight(index) {
            worklist.push_back((label.clone(), 0));
        }

        while let Some((current, depth)) = worklist.pop_front() {
            if depth > max_depth || visited.contains(&current) {
                continue;
            }
            for neighbour in next(current.as_str()) {
                if !visited.contains(neighbour) {
                    worklist.push_back((neighbour.clone(), depth + 1));
                }
            }
            visited.insert(current);
        }

        visited
    }

    pub fn node_count(&self) -> usize {
        self.edges.node_count()
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary::of(&self.edges)
    }

    /// True when every non-Entry node has exactly one control parent
    pub fn is_control_tree(&self) -> bool {
        self.edges.nodes().all(|n| {
            let parents = self.edges.predecessors(n.as_str(), Some(EdgeStyle::Control)).len();
            if n.as_str() == ENTRY_LABEL {
                parents == 0
            } else {
                parents == 1
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(s: &str) -> NodeLabel {
        NodeLabel::from_raw(s)
    }

    /// Entry -> n1, n2, n4; n4 -> n3 (control); n1 -> n2 -> n3 (data)
    fn sample() -> ProgramDependenceGraph {
        let mut edges = EdgeSet::new();
        let entry = NodeLabel::entry();
        edges.insert(&entry, &l("n1"), EdgeStyle::Control);
        edges.insert(&entry, &l("n2"), EdgeStyle::Control);
        edges.insert(&entry, &l("n4"), EdgeStyle::Control);
        edges.insert(&l("n4"), &l("n3"), EdgeStyle::Control);
        edges.insert(&l("n1"), &l("n2"), EdgeStyle::Data);
        edges.insert(&l("n2"), &l("n3"), EdgeStyle::Data);

        let mut ranks = RankMap::new();
        ranks.insert(0, vec![entry]);
        ranks.insert(1, vec![l("n1"), l("n2"), l("n4")]);
        ranks.insert(2, vec![l("n3")]);
        ProgramDependenceGraph::new("T.m", edges, ranks)
    }

    fn names(set: &FxHashSet<NodeLabel>) -> Vec<String> {
        let mut v: Vec<String> = set.iter().map(|l| l.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_dependencies_by_kind() {
        let pdg = sample();
        assert_eq!(pdg.dependencies("n3", DependencyType::Both).len(), 2);
        assert_eq!(pdg.dependencies("n3", DependencyType::Data)[0].as_str(), "n2");
        assert_eq!(pdg.dependents("n1", DependencyType::Data)[0].as_str(), "n2");
        assert_eq!(pdg.control_parent("n3").map(|l| l.as_str()), Some("n4"));
        assert!(pdg.control_parent("Entry").is_none());
    }

    #[test]
    fn test_full_and_thin_backward_slice() {
        let pdg = sample();
        assert_eq!(
            names(&pdg.backward_slice("n3", None)),
            vec!["Entry", "n1", "n2", "n3", "n4"]
        );
        assert_eq!(names(&pdg.thin_slice("n3", None)), vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn test_slice_depth_limit() {
        let pdg = sample();
        assert_eq!(names(&pdg.thin_slice("n3", Some(0))), vec!["n3"]);
        assert_eq!(names(&pdg.thin_slice("n3", Some(1))), vec!["n2", "n3"]);
    }

    #[test]
    fn test_forward_slice_and_chop() {
        let pdg = sample();
        assert_eq!(
            names(&pdg.forward_slice_filtered("n1", None, DependencyType::Data)),
            vec!["n1", "n2", "n3"]
        );
        assert_eq!(names(&pdg.chop("n1", "n2", None)), vec!["n1", "n2"]);
        assert!(pdg.chop("n3", "n1", None).is_empty());
        assert_eq!(pdg.hybrid_slice("n2", None).len(), 4);
    }

    #[test]
    fn test_missing_node_slices_empty() {
        let pdg = sample();
        assert!(pdg.backward_slice("nope", None).is_empty());
        assert!(pdg.forward_slice("nope", None).is_empty());
    }

    #[test]
    fn test_ranks_and_tree_shape() {
        let pdg = sample();
        assert_eq!(pdg.depth_of("Entry"), Some(0));
        assert_eq!(pdg.depth_of("n3"), Some(2));
        assert!(pdg.is_control_tree());
        assert_eq!(pdg.summary().data_edges, 2);
    }

    #[test]
    fn test_self_dependency_terminates() {
        let mut edges = EdgeSet::new();
        edges.insert(&l("x"), &l("x"), EdgeStyle::Data);
        let pdg = ProgramDependenceGraph::new("T.m", edges, RankMap::new());
        assert_eq!(pdg.backward_slice("x", None).len(), 1);
    }
}
