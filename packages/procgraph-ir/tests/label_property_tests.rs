//! Property-based tests for labels and edge sets
//!
//! - Labels count up from 1 without gaps and keep their fragment
//! - Inserting an edge twice never duplicates it
//! - Rebuilding the same procedure yields the same edges

mod common;

use std::collections::HashSet;

use procgraph_ir::shared::NodeLabeler;
use procgraph_ir::{CfgBuilder, EdgeSet, EdgeStyle, NodeLabel, PdgBuilder};
use proptest::prelude::*;

fn style(data: bool) -> EdgeStyle {
    if data {
        EdgeStyle::Data
    } else {
        EdgeStyle::Control
    }
}

fn edge_list(edges: &EdgeSet) -> Vec<(String, String, EdgeStyle)> {
    edges
        .edges()
        .map(|e| (e.source.to_string(), e.target.to_string(), e.style))
        .collect()
}

proptest! {
    #[test]
    fn prop_labels_are_sequential(fragments in prop::collection::vec("[a-z0-9 =;()+]{0,16}", 1..20)) {
        let mut labeler = NodeLabeler::new();
        for (i, fragment) in fragments.iter().enumerate() {
            let label = labeler.label(fragment).unwrap();
            prop_assert_eq!(label.sequence(), Some(i as u64 + 1));
            prop_assert_eq!(label.fragment(), fragment.as_str());
        }
        prop_assert_eq!(labeler.issued(), fragments.len());
    }

    #[test]
    fn prop_limit_is_exact(limit in 1usize..50) {
        let mut labeler = NodeLabeler::with_limit(limit);
        for _ in 0..limit {
            prop_assert!(labeler.label("x").is_ok());
        }
        prop_assert!(labeler.label("x").is_err());
    }

    #[test]
    fn prop_edges_are_idempotent(raw in prop::collection::vec((0u8..6, 0u8..6, any::<bool>()), 0..40)) {
        let mut edges = EdgeSet::new();
        let mut distinct = HashSet::new();

        for (s, t, data) in &raw {
            let source = NodeLabel::from_raw(format!("n{}", s));
            let target = NodeLabel::from_raw(format!("n{}", t));
            let fresh = distinct.insert((*s, *t, *data));
            prop_assert_eq!(edges.insert(&source, &target, style(*data)), fresh);
            prop_assert!(!edges.insert(&source, &target, style(*data)));
        }
        prop_assert_eq!(edges.len(), distinct.len());
    }

    #[test]
    fn prop_rebuild_is_deterministic(branches in 1usize..5, loops in 0usize..3) {
        let mut body = String::from("int x = 0;");
        for i in 0..branches {
            body.push_str(&format!("if (x > {i}) {{ x = x + {i}; }} else {{ use(x); }}"));
        }
        for _ in 0..loops {
            body.push_str("while (x < 9) { x++; }");
        }
        let procedure = common::method(&body);

        let cfg_a = CfgBuilder::new().build(&procedure).unwrap();
        let cfg_b = CfgBuilder::new().build(&procedure).unwrap();
        prop_assert_eq!(edge_list(cfg_a.edges()), edge_list(cfg_b.edges()));

        let pdg_a = PdgBuilder::new().build(&procedure).unwrap();
        let pdg_b = PdgBuilder::new().build(&procedure).unwrap();
        prop_assert_eq!(edge_list(pdg_a.edges()), edge_list(pdg_b.edges()));
    }
}
