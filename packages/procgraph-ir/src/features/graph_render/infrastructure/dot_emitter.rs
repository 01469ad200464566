//! Graph description emitter
//!
//! Produces the DOT body of a graph, one statement per line:
//!
//! ```text
//! { rank = same {"(1) a = 1;","(2) if (c)"} }   PDG, one line per depth
//! "(1) a = 1;"->"(2) if (c)";                   control edge
//! "(1) a = 1;"->"(3) use(a);"[style=dashed];    data edge
//! "(3) use(a);"-> Stop;                         CFG exit
//! ```
//!
//! `wrap_digraph` adds the `digraph` envelope.

use std::fmt::Write;

use crate::config::{AnalysisConfig, DataEdgeStyle};
use crate::features::flow_graph::domain::ControlFlowGraph;
use crate::features::graph_render::domain::DataPalette;
use crate::features::pdg::infrastructure::ProgramDependenceGraph;
use crate::shared::models::STOP_LABEL;
use crate::shared::utils::escape_quotes;

#[derive(Debug, Clone, Copy)]
pub struct DotEmitter {
    data_edge_style: DataEdgeStyle,
    rank_by_depth: bool,
}

impl DotEmitter {
    pub fn new(data_edge_style: DataEdgeStyle, rank_by_depth: bool) -> Self {
        Self {
            data_edge_style,
            rank_by_depth,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.emit.data_edge_style, config.pdg.rank_by_depth)
    }

    /// Control edges in creation order; edges into `Stop` come last
    pub fn emit_cfg(&self, cfg: &ControlFlowGraph) -> String {
        let mut out = String::new();
        let mut exits = Vec::new();

        for edge in cfg.edges().edges() {
            if edge.target.as_str() == STOP_LABEL {
                exits.push(edge.source);
                continue;
            }
            // writing into a String cannot fail
            let _ = writeln!(out, "{}->{};", edge.source, edge.target);
        }
        for source in exits {
            let _ = writeln!(out, "{}-> {};", source, STOP_LABEL);
        }
        out
    }

    /// Rank groups, then control edges, then data edges
    pub fn emit_pdg(&self, pdg: &ProgramDependenceGraph) -> String {
        let mut out = String::new();

        if self.rank_by_depth {
            for labels in pdg.ranks().values() {
                let joined = labels
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                let _ = writeln!(out, "{{ rank = same {{{}}} }}", joined);
            }
        }

        for edge in pdg.control_edges() {
            let _ = writeln!(out, "{}->{};", edge.source, edge.target);
        }

        let mut palette = DataPalette::new();
        for edge in pdg.data_edges() {
            match self.data_edge_style {
                DataEdgeStyle::Dashed => {
                    let _ = writeln!(out, "{}->{}[style=dashed];", edge.source, edge.target);
                }
                DataEdgeStyle::ColorPerSource => {
                    let colour = palette.colour_for(edge.source);
                    let _ = writeln!(
                        out,
                        "{}->{}[style=dashed,color={}];",
                        edge.source, edge.target, colour
                    );
                }
            }
        }
        out
    }
}

impl Default for DotEmitter {
    fn default() -> Self {
        Self::new(DataEdgeStyle::Dashed, true)
    }
}

/// Wrap an emitted body into a complete `digraph` document
pub fn wrap_digraph(name: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + name.len() + 16);
    let _ = writeln!(out, "digraph \"{}\" {{", escape_quotes(name));
    out.push_str(body);
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::infrastructure::CfgBuilder;
    use crate::features::parsing::domain::{Expr, Procedure, Stmt};
    use crate::features::pdg::infrastructure::PdgBuilder;
    use pretty_assertions::assert_eq;

    fn procedure() -> Procedure {
        Procedure::new(
            "T.m",
            vec![
                Stmt::Expr(Expr::assign("a", Expr::lit("1"))),
                Stmt::If {
                    cond: Expr::name("c"),
                    then: vec![Stmt::Expr(Expr::call("use", vec![Expr::name("a")]))],
                    else_: None,
                },
            ],
        )
    }

    #[test]
    fn test_cfg_text_ends_with_stop_lines() {
        let cfg = CfgBuilder::new().build(&procedure()).unwrap();
        let text = DotEmitter::default().emit_cfg(&cfg);

        assert_eq!(
            text,
            concat!(
                "Start->\"(1) a = 1;\";\n",
                "\"(1) a = 1;\"->\"(2) if (c)\";\n",
                "\"(2) if (c)\"->\"(3) use(a);\";\n",
                "\"(3) use(a);\"-> Stop;\n",
                "\"(2) if (c)\"-> Stop;\n",
            )
        );
    }

    #[test]
    fn test_pdg_text_with_ranks_and_dashed_data() {
        let pdg = PdgBuilder::new().build(&procedure()).unwrap();
        let text = DotEmitter::new(DataEdgeStyle::Dashed, true).emit_pdg(&pdg);

        assert_eq!(
            text,
            concat!(
                "{ rank = same {Entry} }\n",
                "{ rank = same {\"(1) a = 1;\",\"(2) if (c)\"} }\n",
                "{ rank = same {\"(3) use(a);\"} }\n",
                "Entry->\"(1) a = 1;\";\n",
                "Entry->\"(2) if (c)\";\n",
                "\"(2) if (c)\"->\"(3) use(a);\";\n",
                "\"(1) a = 1;\"->\"(3) use(a);\"[style=dashed];\n",
            )
        );
    }

    #[test]
    fn test_colour_per_source_without_ranks() {
        let pdg = PdgBuilder::new().build(&procedure()).unwrap();
        let text = DotEmitter::new(DataEdgeStyle::ColorPerSource, false).emit_pdg(&pdg);

        assert!(!text.contains("rank"));
        assert!(text.contains("\"(1) a = 1;\"->\"(3) use(a);\"[style=dashed,color=DarkGray];"));
    }

    #[test]
    fn test_wrap_digraph() {
        assert_eq!(
            wrap_digraph("T.m", "a->b;\n"),
            "digraph \"T.m\" {\na->b;\n}\n"
        );
    }
}
