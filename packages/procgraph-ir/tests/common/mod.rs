//! Common test utilities for procgraph-ir
//!
//! Java snippets are wrapped into `class T { void m(int n) { ... } }` and
//! lowered through the real front-end.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};

use procgraph_ir::features::parsing::{ExtractProceduresUseCase, JavaLowering, Procedure};
use procgraph_ir::{CfgBuilder, ControlFlowGraph, NodeLabel, PdgBuilder, ProgramDependenceGraph};

/// Lower a method body into a procedure named `T.m`
pub fn method(body: &str) -> Procedure {
    let source = format!("class T {{ void m(int n) {{ {} }} }}", body);
    let (mut accepted, skipped) = ExtractProceduresUseCase::new(JavaLowering::new())
        .execute_partitioned(&source)
        .expect("snippet should parse");
    assert!(skipped.is_empty(), "skipped: {:?}", skipped);
    assert_eq!(accepted.len(), 1);
    accepted.remove(0)
}

pub fn cfg_of(body: &str) -> ControlFlowGraph {
    CfgBuilder::new()
        .build(&method(body))
        .expect("cfg should build")
}

pub fn pdg_of(body: &str) -> ProgramDependenceGraph {
    PdgBuilder::new()
        .build(&method(body))
        .expect("pdg should build")
}

fn find<'a>(mut nodes: impl Iterator<Item = &'a NodeLabel>, fragment: &str) -> String {
    match fragment {
        "Start" | "Stop" | "Entry" => fragment.to_string(),
        _ => nodes
            .find(|n| n.fragment() == fragment)
            .unwrap_or_else(|| panic!("no node with fragment {:?}", fragment))
            .to_string(),
    }
}

/// Full label of the CFG node whose source text is `fragment`
pub fn cfg_node(cfg: &ControlFlowGraph, fragment: &str) -> String {
    find(cfg.nodes(), fragment)
}

pub fn pdg_node(pdg: &ProgramDependenceGraph, fragment: &str) -> String {
    find(pdg.edges().nodes(), fragment)
}

pub fn cfg_edge(cfg: &ControlFlowGraph, from: &str, to: &str) -> bool {
    cfg.contains_edge(&cfg_node(cfg, from), &cfg_node(cfg, to))
}

pub fn data_edge(pdg: &ProgramDependenceGraph, from: &str, to: &str) -> bool {
    pdg.has_data_edge(&pdg_node(pdg, from), &pdg_node(pdg, to))
}

pub fn control_edge(pdg: &ProgramDependenceGraph, from: &str, to: &str) -> bool {
    pdg.has_control_edge(&pdg_node(pdg, from), &pdg_node(pdg, to))
}

/// Labels reachable from `start` following successors (or predecessors)
pub fn reachable(cfg: &ControlFlowGraph, start: &str, forward: bool) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([start.to_string()]);
    while let Some(label) = queue.pop_front() {
        if !seen.insert(label.clone()) {
            continue;
        }
        let next = if forward {
            cfg.successors(&label)
        } else {
            cfg.predecessors(&label)
        };
        queue.extend(next.into_iter().map(|l| l.to_string()));
    }
    seen
}

/// Non-synthetic labels sorted by sequence number
pub fn numbered<'a>(nodes: impl Iterator<Item = &'a NodeLabel>) -> Vec<String> {
    let mut labels: Vec<&NodeLabel> = nodes.filter(|n| !n.is_synthetic()).collect();
    labels.sort_by_key(|n| n.sequence());
    labels.into_iter().map(|n| n.to_string()).collect()
}
