/*
 * PDG Builder
 *
 * Single walk over a procedure body. Control edges come straight from the
 * nesting; data edges come from resolving every read against the scope
 * tree (see `domain::scope`).
 *
 * Reads only count inside a read context: assignment right-hand sides,
 * conditions and call arguments (receivers included). A bare expression
 * statement such as `x;` reads nothing.
 *
 * Loops record the read sequence number at entry. When a loop closes, every
 * read since then that no definition inside the loop dominates also depends
 * on the loop's final definitions of the same variable. That covers reads of
 * outer definitions, reads answered only by conditional definitions in the
 * loop, and reads nothing answered.
 *
 * If and switch conditions are read before their construct opens, so an
 * assignment inside a condition is visible to every branch.
 */

use rustc_hash::FxHashSet;

use crate::errors::AnalysisError;
use crate::features::parsing::domain::{node_text, Expr, Procedure, Stmt, SwitchEntry};
use crate::features::pdg::domain::{ControlKind, ControlNodeId, Resolution, ScopeArena};
use crate::features::pdg::infrastructure::pdg::{ProgramDependenceGraph, RankMap};
use crate::shared::models::{EdgeSet, EdgeStyle, NodeLabel};
use crate::shared::NodeLabeler;

type BuildResult<T = ()> = Result<T, AnalysisError>;

/// Active read contexts; a name is a use only when one of them is set
#[derive(Debug, Clone, Copy, Default)]
struct ReadContext {
    assignment_rhs: bool,
    condition: bool,
    call_argument: bool,
}

impl ReadContext {
    fn any(&self) -> bool {
        self.assignment_rhs || self.condition || self.call_argument
    }
}

/// One read, kept for back-patching enclosing loops
#[derive(Debug, Clone)]
struct ReadRecord {
    variable: String,
    node: NodeLabel,
    seq: u64,
    resolution: Resolution,
}

/// Which edge kinds end up in the graph
#[derive(Debug, Clone, Copy)]
pub struct PdgOptions {
    pub include_control: bool,
    pub include_data: bool,
}

impl Default for PdgOptions {
    fn default() -> Self {
        Self {
            include_control: true,
            include_data: true,
        }
    }
}

/// Per-procedure PDG builder. Consumed by `build`.
#[derive(Debug)]
pub struct PdgBuilder {
    labeler: NodeLabeler,
    options: PdgOptions,
    edges: EdgeSet,
    arena: ScopeArena,
    root: ControlNodeId,
    stack: Vec<ControlNodeId>,
    current: NodeLabel,
    ctx: ReadContext,
    read_seq: u64,
    reads: Vec<ReadRecord>,
    ranks: RankMap,
}

impl PdgBuilder {
    pub fn new() -> Self {
        Self::with_labeler(NodeLabeler::new())
    }

    pub fn with_labeler(labeler: NodeLabeler) -> Self {
        let entry = NodeLabel::entry();
        let mut arena = ScopeArena::new();
        let root = arena.new_root(entry.clone());
        let mut edges = EdgeSet::new();
        edges.add_node(&entry);
        let mut ranks = RankMap::new();
        ranks.insert(0, vec![entry.clone()]);

        Self {
            labeler,
            options: PdgOptions::default(),
            edges,
            arena,
            root,
            stack: vec![root],
            current: entry,
            ctx: ReadContext::default(),
            read_seq: 0,
            reads: Vec::new(),
            ranks,
        }
    }

    pub fn with_options(mut self, options: PdgOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(mut self, procedure: &Procedure) -> BuildResult<ProgramDependenceGraph> {
        self.visit_block(&procedure.body)?;

        tracing::debug!(
            "pdg {}: {} nodes, {} control / {} data edges, {} unresolved reads",
            procedure.name,
            self.edges.node_count(),
            self.edges.count(EdgeStyle::Control),
            self.edges.count(EdgeStyle::Data),
            self.reads
                .iter()
                .filter(|r| r.resolution.definitions.is_empty())
                .count()
        );
        Ok(ProgramDependenceGraph::new(
            procedure.name.clone(),
            self.edges,
            self.ranks,
        ))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Nodes and edges
    // ═══════════════════════════════════════════════════════════════════════

    fn top(&self) -> ControlNodeId {
        self.stack.last().copied().unwrap_or(self.root)
    }

    /// Label a node, hang it under the innermost open construct and make it current
    fn new_node(&mut self, text: String) -> BuildResult<NodeLabel> {
        let label = self.labeler.label(text)?;
        let parent = self.arena.node(self.top()).label.clone();
        #[cfg(feature = "trace")]
        tracing::trace!("pdg node {} under {}", label, parent);

        self.edges.add_node(&label);
        if self.options.include_control {
            self.edges.insert(&parent, &label, EdgeStyle::Control);
        }
        self.ranks
            .entry(self.stack.len())
            .or_default()
            .push(label.clone());

        self.current = label.clone();
        Ok(label)
    }

    fn data_edge(&mut self, source: &NodeLabel, target: &NodeLabel) {
        if self.options.include_data && self.edges.insert(source, target, EdgeStyle::Data) {
            #[cfg(feature = "trace")]
            tracing::trace!("pdg data {} -> {}", source, target);
        }
    }

    fn open(&mut self, kind: ControlKind, label: NodeLabel) -> ControlNodeId {
        let id = self.arena.open_child(self.top(), kind, label);
        self.stack.push(id);
        id
    }

    fn close(&mut self) {
        self.stack.pop();
    }

    fn with_ctx<R>(
        &mut self,
        set: impl FnOnce(&mut ReadContext),
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let saved = self.ctx;
        set(&mut self.ctx);
        let out = f(self);
        self.ctx = saved;
        out
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Definitions and uses
    // ═══════════════════════════════════════════════════════════════════════

    fn define(&mut self, variable: &str) {
        let owner = self.top();
        self.arena.define(owner, variable, self.current.clone());
    }

    fn read(&mut self, variable: &str) {
        if !self.ctx.any() {
            return;
        }
        let seq = self.read_seq;
        self.read_seq += 1;
        let node = self.current.clone();

        let resolution = self.arena.resolve(self.top(), variable);
        if resolution.definitions.is_empty() {
            #[cfg(feature = "trace")]
            tracing::trace!("pdg unresolved read of {} at {}", variable, node);
        }

        for def in &resolution.definitions {
            let source = self.arena.definition(*def).defining_node.clone();
            self.arena
                .definition_mut(*def)
                .add_reference(node.clone(), seq);
            self.data_edge(&source, &node);
        }
        self.reads.push(ReadRecord {
            variable: variable.to_string(),
            node,
            seq,
            resolution,
        });
    }

    /// Compound assignment and `++`/`--` read their target regardless of context
    fn read_target(&mut self, variable: &str) {
        self.with_ctx(|c| c.assignment_rhs = true, |b| b.read(variable));
    }

    fn read_as_value(&mut self, expr: &Expr) {
        self.with_ctx(|c| c.assignment_rhs = true, |b| b.visit_expr(expr));
    }

    fn read_condition(&mut self, header: &NodeLabel, cond: &Expr) {
        self.current = header.clone();
        self.with_ctx(|c| c.condition = true, |b| b.visit_expr(cond));
    }

    /// Connect reads made since `seq_start` to the loop's final definitions
    fn back_patch(&mut self, loop_id: ControlNodeId, seq_start: u64) {
        for variable in self.arena.variables_defined_within(loop_id) {
            let mut seen: FxHashSet<NodeLabel> = FxHashSet::default();
            let mut targets: Vec<(NodeLabel, u64)> = Vec::new();

            for r in &self.reads {
                if r.seq < seq_start
                    || r.variable != variable
                    || r.resolution.dominated_within(&self.arena, loop_id)
                {
                    continue;
                }
                if seen.insert(r.node.clone()) {
                    targets.push((r.node.clone(), r.seq));
                }
            }
            if targets.is_empty() {
                continue;
            }

            for def in self.arena.last_definitions_in(loop_id, &variable) {
                let source = self.arena.definition(def).defining_node.clone();
                for (target, seq) in &targets {
                    self.arena
                        .definition_mut(def)
                        .add_reference(target.clone(), *seq);
                    self.data_edge(&source, target);
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn visit_block(&mut self, stmts: &[Stmt]) -> BuildResult {
        stmts.iter().try_for_each(|s| self.visit_stmt(s))
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> BuildResult {
        match stmt {
            Stmt::Expr(e) => {
                self.new_node(node_text::statement(e))?;
                self.visit_expr(e);
                Ok(())
            }
            Stmt::Block(stmts) => self.visit_block(stmts),
            Stmt::If { cond, then, else_ } => {
                let header = self.new_node(node_text::if_header(cond))?;
                self.read_condition(&header, cond);
                let id = self.open(ControlKind::If, header);
                self.visit_block(then)?;
                if let Some(else_) = else_ {
                    self.arena.start_new_block(id);
                    self.visit_block(else_)?;
                }
                self.close();
                Ok(())
            }
            Stmt::While { cond, body } => {
                let header = self.new_node(node_text::while_header(cond))?;
                self.visit_loop(ControlKind::While, header, cond, body, &[])
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                for e in init {
                    self.new_node(node_text::for_init(e))?;
                    self.visit_expr(e);
                }
                let header = self.new_node(node_text::for_header(cond))?;
                self.visit_loop(ControlKind::For, header, cond, body, update)
            }
            Stmt::Foreach {
                var_type,
                var,
                iterable,
                body,
            } => self.visit_foreach(var_type, var, iterable, body),
            Stmt::DoWhile { body, cond } => {
                // labeled before the body, matching the CFG numbering
                let header = self.new_node(node_text::while_header(cond))?;
                let id = self.open(ControlKind::DoWhile, header.clone());
                let seq_start = self.read_seq;
                self.visit_block(body)?;
                self.read_condition(&header, cond);
                self.back_patch(id, seq_start);
                self.close();
                Ok(())
            }
            Stmt::Switch { selector, entries } => self.visit_switch(selector, entries),
            Stmt::Return(value) => {
                self.new_node(node_text::return_stmt(value.as_ref()))?;
                if let Some(v) = value {
                    self.read_as_value(v);
                }
                Ok(())
            }
            Stmt::Throw(value) => {
                self.new_node(node_text::throw_stmt(value))?;
                self.read_as_value(value);
                Ok(())
            }
            Stmt::Break | Stmt::Continue | Stmt::Empty => Ok(()),
        }
    }

    /// Pre-tested loop whose header node already exists
    fn visit_loop(
        &mut self,
        kind: ControlKind,
        header: NodeLabel,
        cond: &Expr,
        body: &[Stmt],
        updates: &[Expr],
    ) -> BuildResult {
        let id = self.open(kind, header.clone());
        let seq_start = self.read_seq;

        self.read_condition(&header, cond);
        self.visit_block(body)?;
        for u in updates {
            self.new_node(node_text::statement(u))?;
            self.visit_expr(u);
        }
        // re-evaluated before the next iteration
        self.read_condition(&header, cond);

        self.back_patch(id, seq_start);
        self.close();
        Ok(())
    }

    fn visit_foreach(
        &mut self,
        var_type: &str,
        var: &str,
        iterable: &Expr,
        body: &[Stmt],
    ) -> BuildResult {
        let header = self.new_node(node_text::foreach_header(var_type, var, iterable))?;
        let id = self.open(ControlKind::Foreach, header.clone());
        let seq_start = self.read_seq;

        self.read_condition(&header, iterable);
        self.define(var);
        self.visit_block(body)?;
        self.read_condition(&header, iterable);

        self.back_patch(id, seq_start);
        self.close();
        Ok(())
    }

    fn visit_switch(&mut self, selector: &Expr, entries: &[SwitchEntry]) -> BuildResult {
        let header = self.new_node(node_text::switch_header(selector))?;
        self.read_condition(&header, selector);
        let id = self.open(ControlKind::Switch, header);

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                self.arena.start_new_block(id);
            }
            let case = self.new_node(node_text::case_label(entry.label.as_ref()))?;
            self.open(ControlKind::SwitchCase, case);
            self.visit_block(&entry.body)?;
            self.close();
        }

        self.close();
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Name(name) => self.read(name),
            Expr::Literal(_) | Expr::This => {}
            Expr::Assign { target, op, value } => {
                if op.is_compound() {
                    self.read_target(target);
                }
                self.read_as_value(value);
                self.define(target);
            }
            Expr::Update { target, .. } => {
                self.read_target(target);
                self.define(target);
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            Expr::Paren(inner) => self.visit_expr(inner),
            Expr::Call { receiver, args, .. } => self.with_ctx(
                |c| c.call_argument = true,
                |b| {
                    if let Some(r) = receiver {
                        b.visit_expr(r);
                    }
                    args.iter().for_each(|a| b.visit_expr(a));
                },
            ),
            Expr::FieldAccess { object, .. } => self.visit_expr(object),
            Expr::ArrayAccess { array, index } => {
                self.visit_expr(array);
                self.visit_expr(index);
            }
            Expr::Conditional {
                cond,
                then,
                else_,
            } => {
                self.visit_expr(cond);
                self.visit_expr(then);
                self.visit_expr(else_);
            }
            Expr::Cast { expr, .. } => self.visit_expr(expr),
            Expr::New { args, .. } => self.with_ctx(
                |c| c.call_argument = true,
                |b| args.iter().for_each(|a| b.visit_expr(a)),
            ),
            Expr::NewArray { dims, init, .. } => {
                dims.iter().for_each(|d| self.visit_expr(d));
                if let Some(items) = init {
                    items.iter().for_each(|i| self.visit_expr(i));
                }
            }
            Expr::ArrayInit(items) => items.iter().for_each(|i| self.visit_expr(i)),
            Expr::InstanceOf { expr, .. } => self.visit_expr(expr),
            Expr::VarDecl { declarators, .. } => {
                for d in declarators {
                    // a declaration without initializer defines nothing
                    if let Some(init) = &d.init {
                        self.read_as_value(init);
                        self.define(&d.name);
                    }
                }
            }
        }
    }
}

impl Default for PdgBuilder {
    fn default() -> Self {
        Self::new()
    }
}
