/*
 * CFG Builder
 *
 * Single walk over a procedure body emitting one control edge per structural
 * transition.
 *
 * State:
 * - `previous`: structurally preceding node (starts at `Start`)
 * - `records`: stack of control records; the top `pending` ones are closed
 *   constructs whose exits still wait for the next statement
 * - `broke`: the current switch entry ended in `break`
 *
 * Every new node goes through `connect`, which links it from `previous` and
 * flushes the pending exits onto it. Convergence of nested constructs falls
 * out of that flush without recursion in edge emission.
 *
 * Numbering: a do-while condition takes its label before the body does, so
 * `do { a(); } while (c);` yields `(1) while (c)` and `(2) a();`. The PDG
 * builder allocates in the same order and both graphs share labels.
 */

use crate::errors::AnalysisError;
use crate::features::flow_graph::domain::{ControlFlowGraph, ControlRecord, RecordKind};
use crate::features::parsing::domain::{node_text, Expr, Procedure, Stmt, SwitchEntry};
use crate::shared::models::{EdgeSet, EdgeStyle, NodeLabel};
use crate::shared::NodeLabeler;

type BuildResult<T = ()> = Result<T, AnalysisError>;

/// Per-procedure CFG builder. Consumed by `build`.
#[derive(Debug)]
pub struct CfgBuilder {
    labeler: NodeLabeler,
    edges: EdgeSet,
    previous: NodeLabel,
    records: Vec<ControlRecord>,
    pending: usize,
    broke: bool,
}

impl CfgBuilder {
    pub fn new() -> Self {
        Self::with_labeler(NodeLabeler::new())
    }

    pub fn with_labeler(labeler: NodeLabeler) -> Self {
        let start = NodeLabel::start();
        let mut edges = EdgeSet::new();
        edges.add_node(&start);
        Self {
            labeler,
            edges,
            previous: start,
            records: Vec::new(),
            pending: 0,
            broke: false,
        }
    }

    pub fn build(mut self, procedure: &Procedure) -> BuildResult<ControlFlowGraph> {
        self.visit_block(&procedure.body)?;
        self.connect(&NodeLabel::stop());

        tracing::debug!(
            "cfg {}: {} nodes, {} edges",
            procedure.name,
            self.edges.node_count(),
            self.edges.len()
        );
        Ok(ControlFlowGraph::new(procedure.name.clone(), self.edges))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edge plumbing
    // ═══════════════════════════════════════════════════════════════════════

    fn edge(&mut self, source: &NodeLabel, target: &NodeLabel) {
        if self.edges.insert(source, target, EdgeStyle::Control) {
            #[cfg(feature = "trace")]
            tracing::trace!("cfg edge {} -> {}", source, target);
        }
    }

    /// Link `current` from `previous`, hand it to waiting do-whiles, flush
    /// pending exits onto it and make it the new `previous`.
    fn connect(&mut self, current: &NodeLabel) {
        #[cfg(feature = "trace")]
        tracing::trace!("cfg node {}", current);
        let previous = self.previous.clone();
        self.edge(&previous, current);

        // target-less do-whiles can only sit directly under the pending records
        let mut idx = self.records.len().checked_sub(self.pending + 1);
        while let Some(i) = idx {
            if !self.records[i].awaits_loop_target() {
                break;
            }
            self.records[i].loop_target = Some(current.clone());
            idx = i.checked_sub(1);
        }

        self.flush(current);
        self.previous = current.clone();
    }

    /// Pop every pending closed record, linking its exits to `current`
    fn flush(&mut self, current: &NodeLabel) {
        while self.pending > 0 {
            self.pending -= 1;
            let Some(record) = self.records.pop() else {
                break;
            };
            for exit in &record.exits {
                self.edge(exit, current);
            }
        }
    }

    fn plain(&mut self, text: String) -> BuildResult {
        let label = self.labeler.label(text)?;
        self.connect(&label);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn visit_block(&mut self, stmts: &[Stmt]) -> BuildResult {
        stmts.iter().try_for_each(|s| self.visit_stmt(s))
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> BuildResult {
        match stmt {
            Stmt::Expr(e) => self.plain(node_text::statement(e)),
            Stmt::Block(stmts) => self.visit_block(stmts),
            Stmt::If { cond, then, else_ } => self.visit_if(cond, then, else_.as_deref()),
            Stmt::While { cond, body } => {
                let header = self.labeler.label(node_text::while_header(cond))?;
                self.connect(&header);
                self.visit_loop(RecordKind::While, &header, body, &[])
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                for e in init {
                    self.plain(node_text::for_init(e))?;
                }
                let header = self.labeler.label(node_text::for_header(cond))?;
                self.connect(&header);
                self.visit_loop(RecordKind::For, &header, body, update)
            }
            Stmt::Foreach {
                var_type,
                var,
                iterable,
                body,
            } => {
                let header = self
                    .labeler
                    .label(node_text::foreach_header(var_type, var, iterable))?;
                self.connect(&header);
                self.visit_loop(RecordKind::Foreach, &header, body, &[])
            }
            Stmt::DoWhile { body, cond } => self.visit_do_while(body, cond),
            Stmt::Switch { selector, entries } => self.visit_switch(selector, entries),
            Stmt::Return(value) => self.plain(node_text::return_stmt(value.as_ref())),
            Stmt::Throw(value) => self.plain(node_text::throw_stmt(value)),
            Stmt::Break => {
                self.broke = true;
                Ok(())
            }
            Stmt::Continue | Stmt::Empty => Ok(()),
        }
    }

    fn visit_if(&mut self, cond: &Expr, then: &[Stmt], else_: Option<&[Stmt]>) -> BuildResult {
        let header = self.labeler.label(node_text::if_header(cond))?;
        self.connect(&header);

        self.records
            .push(ControlRecord::new(RecordKind::If, vec![header.clone()]));
        let idx = self.records.len() - 1;

        self.visit_block(then)?;

        if let Some(else_) = else_ {
            let then_final = std::mem::replace(&mut self.previous, header);
            self.records[idx].exits[0] = then_final;

            // closed constructs of the then-branch must not flow into the else-branch
            let hidden = std::mem::take(&mut self.pending);
            self.visit_block(else_)?;
            self.pending += hidden;
        }

        self.pending += 1;
        Ok(())
    }

    /// Body of a pre-tested loop whose header is already connected
    fn visit_loop(
        &mut self,
        kind: RecordKind,
        header: &NodeLabel,
        body: &[Stmt],
        updates: &[Expr],
    ) -> BuildResult {
        self.records
            .push(ControlRecord::new(kind, vec![header.clone()]));
        let outer_break = std::mem::replace(&mut self.broke, false);

        self.visit_block(body)?;
        for u in updates {
            self.plain(node_text::statement(u))?;
        }

        // back-edge; closed constructs at the end of the body converge on the header
        self.connect(header);
        self.records.pop();
        self.broke = outer_break;
        Ok(())
    }

    fn visit_do_while(&mut self, body: &[Stmt], cond: &Expr) -> BuildResult {
        // allocated up front so both builders number the procedure identically
        let cond_label = self.labeler.label(node_text::while_header(cond))?;

        let at = self.records.len() - self.pending;
        self.records
            .insert(at, ControlRecord::new(RecordKind::DoWhile, Vec::new()));
        let outer_break = std::mem::replace(&mut self.broke, false);

        self.visit_block(body)?;
        self.connect(&cond_label);

        let target = self
            .records
            .pop()
            .and_then(|r| r.loop_target)
            .unwrap_or_else(|| cond_label.clone());
        self.edge(&cond_label, &target);

        self.broke = outer_break;
        Ok(())
    }

    fn visit_switch(&mut self, selector: &Expr, entries: &[SwitchEntry]) -> BuildResult {
        let header = self.labeler.label(node_text::switch_header(selector))?;
        self.connect(&header);

        self.records
            .push(ControlRecord::new(RecordKind::Switch, Vec::new()));
        let idx = self.records.len() - 1;
        let outer_break = self.broke;

        // closed records of entries that ended in `break`; they converge after the switch
        let mut parked = 0;
        let mut fallthrough: Option<NodeLabel> = None;

        for entry in entries {
            let case = self
                .labeler
                .label(node_text::case_label(entry.label.as_ref()))?;
            self.edge(&header, &case);
            if let Some(prev_final) = fallthrough.take() {
                self.edge(&prev_final, &case);
                self.flush(&case);
            }
            self.previous = case;

            self.broke = false;
            self.visit_block(&entry.body)?;

            if self.broke {
                let last = self.previous.clone();
                self.records[idx].exits.push(last);
                parked += std::mem::take(&mut self.pending);
            } else {
                fallthrough = Some(self.previous.clone());
            }
        }

        // the final node already reaches the continuation through `previous`
        let last = self.previous.clone();
        self.records[idx].exits.retain(|l| *l != last);

        self.pending += parked + 1;
        self.broke = outer_break;
        Ok(())
    }
}

impl Default for CfgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::BinaryOp;

    fn call(name: &str) -> Stmt {
        Stmt::Expr(Expr::call(name, vec![]))
    }

    fn cond(name: &str) -> Expr {
        Expr::name(name)
    }

    fn build(body: Vec<Stmt>) -> ControlFlowGraph {
        CfgBuilder::new()
            .build(&Procedure::new("T.m", body))
            .unwrap()
    }

    /// Label of the node whose source fragment is `fragment`
    fn node(cfg: &ControlFlowGraph, fragment: &str) -> String {
        cfg.nodes()
            .find(|n| n.fragment() == fragment)
            .unwrap_or_else(|| panic!("no node {}", fragment))
            .to_string()
    }

    fn has(cfg: &ControlFlowGraph, from: &str, to: &str) -> bool {
        let resolve = |f: &str| match f {
            "Start" | "Stop" => f.to_string(),
            _ => node(cfg, f),
        };
        cfg.contains_edge(&resolve(from), &resolve(to))
    }

    fn assert_connected(cfg: &ControlFlowGraph) {
        assert!(cfg.dead_ends().is_empty(), "dead ends: {:?}", cfg.dead_ends());
        assert!(cfg.orphans().is_empty(), "orphans: {:?}", cfg.orphans());
    }

    #[test]
    fn test_sequence() {
        let cfg = build(vec![call("a"), call("b")]);
        assert!(has(&cfg, "Start", "a();"));
        assert!(has(&cfg, "a();", "b();"));
        assert!(has(&cfg, "b();", "Stop"));
        assert_eq!(cfg.edge_count(), 3);
    }

    #[test]
    fn test_empty_body() {
        let cfg = build(vec![]);
        assert!(cfg.contains_edge("Start", "Stop"));
    }

    #[test]
    fn test_if_else_converges() {
        let cfg = build(vec![
            Stmt::If {
                cond: cond("c"),
                then: vec![call("a")],
                else_: Some(vec![call("b")]),
            },
            call("x"),
        ]);
        assert!(has(&cfg, "if (c)", "a();"));
        assert!(has(&cfg, "if (c)", "b();"));
        assert!(has(&cfg, "a();", "x();"));
        assert!(has(&cfg, "b();", "x();"));
        assert!(!has(&cfg, "if (c)", "x();"));
        assert!(!has(&cfg, "a();", "b();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_if_without_else_falls_through() {
        let cfg = build(vec![
            Stmt::If {
                cond: cond("c"),
                then: vec![call("a")],
                else_: None,
            },
            call("x"),
        ]);
        assert!(has(&cfg, "if (c)", "x();"));
        assert!(has(&cfg, "a();", "x();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_nested_if_in_then_does_not_leak_into_else() {
        let cfg = build(vec![
            Stmt::If {
                cond: cond("c"),
                then: vec![Stmt::If {
                    cond: cond("d"),
                    then: vec![call("a")],
                    else_: None,
                }],
                else_: Some(vec![call("b")]),
            },
            call("x"),
        ]);
        assert!(!has(&cfg, "a();", "b();"));
        assert!(!has(&cfg, "if (d)", "b();"));
        assert!(has(&cfg, "a();", "x();"));
        assert!(has(&cfg, "if (d)", "x();"));
        assert!(has(&cfg, "b();", "x();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_while_back_edge() {
        let cfg = build(vec![
            call("p"),
            Stmt::While {
                cond: cond("c"),
                body: vec![call("a")],
            },
            call("x"),
        ]);
        assert!(has(&cfg, "p();", "while (c)"));
        assert!(has(&cfg, "while (c)", "a();"));
        assert!(has(&cfg, "a();", "while (c)"));
        assert!(has(&cfg, "while (c)", "x();"));
        assert!(!has(&cfg, "a();", "p();"));
        assert!(!has(&cfg, "a();", "x();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_if_at_end_of_loop_body_converges_on_header() {
        let cfg = build(vec![Stmt::While {
            cond: cond("c"),
            body: vec![Stmt::If {
                cond: cond("d"),
                then: vec![call("a")],
                else_: None,
            }],
        }]);
        assert!(has(&cfg, "a();", "while (c)"));
        assert!(has(&cfg, "if (d)", "while (c)"));
        assert!(has(&cfg, "while (c)", "Stop"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_for_with_init_and_update() {
        let i_lt_n = Expr::binary(BinaryOp::Lt, cond("i"), cond("n"));
        let cfg = build(vec![Stmt::For {
            init: vec![Expr::decl("int", "i", Some(Expr::lit("0")))],
            cond: i_lt_n,
            update: vec![Expr::Update {
                op: crate::features::parsing::domain::UpdateOp::PostInc,
                target: "i".into(),
            }],
            body: vec![call("a")],
        }]);
        assert!(has(&cfg, "Start", "int i = 0"));
        assert!(has(&cfg, "int i = 0", "for (i < n)"));
        assert!(has(&cfg, "for (i < n)", "a();"));
        assert!(has(&cfg, "a();", "i++;"));
        assert!(has(&cfg, "i++;", "for (i < n)"));
        assert!(has(&cfg, "for (i < n)", "Stop"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_do_while_loops_to_first_body_node() {
        let cfg = build(vec![
            Stmt::DoWhile {
                body: vec![call("a"), call("b")],
                cond: cond("c"),
            },
            call("x"),
        ]);
        assert!(has(&cfg, "Start", "a();"));
        assert!(has(&cfg, "b();", "while (c)"));
        assert!(has(&cfg, "while (c)", "a();"));
        assert!(has(&cfg, "while (c)", "x();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_do_while_after_if_receives_pending_exits() {
        let cfg = build(vec![
            Stmt::If {
                cond: cond("c"),
                then: vec![call("a")],
                else_: None,
            },
            Stmt::DoWhile {
                body: vec![call("b")],
                cond: cond("d"),
            },
        ]);
        assert!(has(&cfg, "a();", "b();"));
        assert!(has(&cfg, "if (c)", "b();"));
        assert!(has(&cfg, "while (d)", "b();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_nested_do_while_share_reentry() {
        let cfg = build(vec![Stmt::DoWhile {
            body: vec![Stmt::DoWhile {
                body: vec![call("a")],
                cond: cond("inner"),
            }],
            cond: cond("outer"),
        }]);
        assert!(has(&cfg, "while (inner)", "a();"));
        assert!(has(&cfg, "while (inner)", "while (outer)"));
        assert!(has(&cfg, "while (outer)", "a();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_empty_do_while_loops_on_itself() {
        let cfg = build(vec![Stmt::DoWhile {
            body: vec![],
            cond: cond("c"),
        }]);
        assert!(has(&cfg, "while (c)", "while (c)"));
        assert!(has(&cfg, "Start", "while (c)"));
    }

    #[test]
    fn test_switch_fallthrough_and_break() {
        let cfg = build(vec![
            Stmt::Switch {
                selector: cond("x"),
                entries: vec![
                    SwitchEntry::case(Expr::lit("1"), vec![call("a")]),
                    SwitchEntry::case(Expr::lit("2"), vec![call("b"), Stmt::Break]),
                ],
            },
            call("n"),
        ]);
        assert!(has(&cfg, "switch (x)", "case 1"));
        assert!(has(&cfg, "case 1", "a();"));
        assert!(has(&cfg, "a();", "case 2"));
        assert!(has(&cfg, "switch (x)", "case 2"));
        assert!(has(&cfg, "case 2", "b();"));
        assert!(has(&cfg, "b();", "n();"));
        assert!(!has(&cfg, "a();", "n();"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_switch_break_entries_all_reach_continuation() {
        let cfg = build(vec![
            Stmt::Switch {
                selector: cond("x"),
                entries: vec![
                    SwitchEntry::case(Expr::lit("1"), vec![call("a"), Stmt::Break]),
                    SwitchEntry::case(Expr::lit("2"), vec![call("b"), Stmt::Break]),
                    SwitchEntry::default(vec![call("d")]),
                ],
            },
            call("n"),
        ]);
        assert!(has(&cfg, "a();", "n();"));
        assert!(has(&cfg, "b();", "n();"));
        assert!(has(&cfg, "d();", "n();"));
        assert!(!has(&cfg, "a();", "case 2"));
        assert!(!has(&cfg, "b();", "default"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_break_inside_loop_does_not_end_switch_entry() {
        let cfg = build(vec![
            Stmt::Switch {
                selector: cond("x"),
                entries: vec![
                    SwitchEntry::case(
                        Expr::lit("1"),
                        vec![Stmt::While {
                            cond: cond("c"),
                            body: vec![Stmt::Break],
                        }],
                    ),
                    SwitchEntry::case(Expr::lit("2"), vec![call("b")]),
                ],
            },
            call("n"),
        ]);
        // the while loop falls through into case 2
        assert!(has(&cfg, "while (c)", "case 2"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_if_inside_break_entry_converges_after_switch() {
        let cfg = build(vec![
            Stmt::Switch {
                selector: cond("x"),
                entries: vec![
                    SwitchEntry::case(
                        Expr::lit("1"),
                        vec![
                            Stmt::If {
                                cond: cond("c"),
                                then: vec![call("a")],
                                else_: None,
                            },
                            Stmt::Break,
                        ],
                    ),
                    SwitchEntry::default(vec![call("d")]),
                ],
            },
            call("n"),
        ]);
        assert!(has(&cfg, "a();", "n();"));
        assert!(has(&cfg, "if (c)", "n();"));
        assert!(!has(&cfg, "a();", "default"));
        assert_connected(&cfg);
    }

    #[test]
    fn test_return_and_continue() {
        let cfg = build(vec![
            Stmt::While {
                cond: cond("c"),
                body: vec![call("a"), Stmt::Continue],
            },
            Stmt::Return(Some(cond("r"))),
        ]);
        assert!(has(&cfg, "while (c)", "return r;"));
        assert!(has(&cfg, "return r;", "Stop"));
        assert_eq!(cfg.node_count(), 5);
    }

    #[test]
    fn test_node_limit() {
        let result = CfgBuilder::with_labeler(NodeLabeler::with_limit(2))
            .build(&Procedure::new("T.m", vec![call("a"), call("b"), call("c")]));
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::NodeLimitExceeded { limit: 2 }
        );
    }
}
