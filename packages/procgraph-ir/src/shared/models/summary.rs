//! Graph summaries for JSON export

use serde::{Deserialize, Serialize};

use super::edge_set::{EdgeSet, EdgeStyle};

/// Node and edge counts of one graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub control_edges: usize,
    pub data_edges: usize,
}

impl GraphSummary {
    pub fn of(edges: &EdgeSet) -> Self {
        Self {
            nodes: edges.node_count(),
            control_edges: edges.count(EdgeStyle::Control),
            data_edges: edges.count(EdgeStyle::Data),
        }
    }

    pub fn total_edges(&self) -> usize {
        self.control_edges + self.data_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::NodeLabel;

    #[test]
    fn test_summary_counts() {
        let mut edges = EdgeSet::new();
        let (a, b, c) = (
            NodeLabel::from_raw("a"),
            NodeLabel::from_raw("b"),
            NodeLabel::from_raw("c"),
        );
        edges.insert(&a, &b, EdgeStyle::Control);
        edges.insert(&a, &c, EdgeStyle::Data);
        edges.insert(&b, &c, EdgeStyle::Data);

        let summary = GraphSummary::of(&edges);
        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.control_edges, 1);
        assert_eq!(summary.data_edges, 2);
        assert_eq!(summary.total_edges(), 3);
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"nodes":3,"control_edges":1,"data_edges":2}"#
        );
    }
}
