//! Java front-end
//!
//! Parses a compilation unit with tree-sitter-java and lowers every method and
//! constructor body into the closed procedure AST. A procedure containing a
//! construct outside the analysed subset is returned as `SkippedProcedure`;
//! the rest of the file is still lowered.

use tree_sitter::{Node, Parser};

use crate::errors::{LoweringError, ProcgraphError, Result};
use crate::features::parsing::domain::{
    AssignOp, BinaryOp, Declarator, Expr, LoweredProcedure, Param, Procedure, SkippedProcedure,
    Stmt, SwitchEntry, UnaryOp, UpdateOp,
};
use crate::features::parsing::ports::ProcedureSource;
use crate::shared::utils::tree_sitter::{
    children_of_kind, field_children, line_of, named_children, node_text,
};
use crate::shared::ScopeStack;

type LResult<T> = std::result::Result<T, LoweringError>;

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
];

const LITERALS: &[&str] = &[
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
    "character_literal",
    "string_literal",
    "text_block",
    "null_literal",
    "true",
    "false",
    "class_literal",
];

/// tree-sitter-java backed `ProcedureSource`
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaLowering;

impl JavaLowering {
    pub fn new() -> Self {
        Self
    }

    /// Lower every method / constructor with a body
    pub fn lower_source(&self, source: &str) -> Result<Vec<LoweredProcedure>> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| ProcgraphError::parse_error(format!("Java grammar unavailable: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ProcgraphError::parse_error("tree-sitter produced no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let line = first_error_line(&root).unwrap_or(1);
            return Err(ProcgraphError::parse_error(format!(
                "syntax error near line {}",
                line
            )));
        }

        let mut out = Vec::new();
        let mut scopes = ScopeStack::new();
        collect_procedures(&root, source, &mut scopes, &mut out);

        tracing::debug!(
            "lowered {} procedure(s), {} skipped",
            out.iter().filter(|p| p.is_ok()).count(),
            out.iter().filter(|p| p.is_err()).count()
        );
        Ok(out)
    }
}

impl ProcedureSource for JavaLowering {
    fn procedures(&self, source: &str) -> Result<Vec<LoweredProcedure>> {
        self.lower_source(source)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "java"
    }

    fn language_name(&self) -> &'static str {
        "java"
    }
}

fn first_error_line(root: &Node) -> Option<usize> {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(line_of(&node));
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn collect_procedures(
    node: &Node,
    source: &str,
    scopes: &mut ScopeStack,
    out: &mut Vec<LoweredProcedure>,
) {
    for child in named_children(node) {
        let kind = child.kind();
        if TYPE_DECLARATIONS.contains(&kind) {
            let name = child
                .child_by_field_name("name")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_default();
            if let Some(body) = child.child_by_field_name("body") {
                scopes.with_scope(name, |s| collect_procedures(&body, source, s, out));
            }
        } else if kind == "enum_body_declarations" {
            collect_procedures(&child, source, scopes, out);
        } else if kind == "method_declaration" || kind == "constructor_declaration" {
            if let Some(lowered) = lower_procedure(&child, source, scopes) {
                out.push(lowered);
            }
        }
    }
}

fn lower_procedure(node: &Node, source: &str, scopes: &ScopeStack) -> Option<LoweredProcedure> {
    // abstract and interface methods have nothing to analyse
    let body = node.child_by_field_name("body")?;

    let simple = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, source))
        .unwrap_or("<anonymous>");
    let name = scopes.qualify(simple);
    let line = line_of(node);

    let lowerer = Lowerer { source };
    let params = node
        .child_by_field_name("parameters")
        .map(|p| lowerer.params(&p))
        .unwrap_or_default();

    Some(match lowerer.block_items(&body) {
        Ok(body) => Ok(Procedure {
            name,
            params,
            body,
            line,
        }),
        Err(error) => {
            tracing::debug!("skipping {} (line {}): {}", name, line, error);
            Err(SkippedProcedure { name, line, error })
        }
    })
}

struct Lowerer<'s> {
    source: &'s str,
}

impl<'s> Lowerer<'s> {
    fn text(&self, node: &Node) -> &'s str {
        node_text(node, self.source)
    }

    fn required<'t>(&self, node: &Node<'t>, field: &'static str) -> LResult<Node<'t>> {
        node.child_by_field_name(field)
            .ok_or_else(|| LoweringError::MissingField {
                kind: describe(node),
                field,
                line: line_of(node),
            })
    }

    fn unsupported<T>(&self, node: &Node) -> LResult<T> {
        Err(LoweringError::Unsupported {
            kind: describe(node),
            line: line_of(node),
        })
    }

    fn params(&self, node: &Node) -> Vec<Param> {
        let mut out = Vec::new();
        for p in named_children(node) {
            match p.kind() {
                "formal_parameter" => {
                    if let (Some(ty), Some(name)) =
                        (p.child_by_field_name("type"), p.child_by_field_name("name"))
                    {
                        out.push(Param {
                            ty: self.text(&ty).to_string(),
                            name: self.text(&name).to_string(),
                        });
                    }
                }
                "spread_parameter" => {
                    let ty = named_children(&p)
                        .into_iter()
                        .find(|c| c.kind() != "variable_declarator" && c.kind() != "modifiers");
                    let name = children_of_kind(&p, "variable_declarator")
                        .first()
                        .and_then(|d| d.child_by_field_name("name"));
                    if let (Some(ty), Some(name)) = (ty, name) {
                        out.push(Param {
                            ty: format!("{}...", self.text(&ty)),
                            name: self.text(&name).to_string(),
                        });
                    }
                }
                _ => {}
            }
        }
        out
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    /// Statements of a `block` / `constructor_body`
    fn block_items(&self, node: &Node) -> LResult<Vec<Stmt>> {
        named_children(node)
            .iter()
            .map(|child| self.stmt(child))
            .collect()
    }

    /// Body of a compound statement, flattening a braced block
    fn body(&self, node: &Node) -> LResult<Vec<Stmt>> {
        if node.kind() == "block" {
            self.block_items(node)
        } else {
            Ok(vec![self.stmt(node)?])
        }
    }

    fn stmt(&self, node: &Node) -> LResult<Stmt> {
        match node.kind() {
            "block" => Ok(Stmt::Block(self.block_items(node)?)),
            "expression_statement" => {
                let inner = first_named(node).ok_or_else(|| LoweringError::MissingField {
                    kind: describe(node),
                    field: "expression",
                    line: line_of(node),
                })?;
                if inner.kind() == "switch_expression" {
                    return self.switch_stmt(&inner);
                }
                Ok(Stmt::Expr(self.expr(&inner)?))
            }
            "local_variable_declaration" => Ok(Stmt::Expr(self.var_decl(node)?)),
            "explicit_constructor_invocation" => Ok(Stmt::Expr(self.constructor_call(node)?)),
            "if_statement" => {
                let cond = self.condition(node)?;
                let then = self.body(&self.required(node, "consequence")?)?;
                let else_ = match node.child_by_field_name("alternative") {
                    Some(alt) => Some(self.body(&alt)?),
                    None => None,
                };
                Ok(Stmt::If { cond, then, else_ })
            }
            "while_statement" => Ok(Stmt::While {
                cond: self.condition(node)?,
                body: self.body(&self.required(node, "body")?)?,
            }),
            "do_statement" => Ok(Stmt::DoWhile {
                body: self.body(&self.required(node, "body")?)?,
                cond: self.condition(node)?,
            }),
            "for_statement" => self.for_stmt(node),
            "enhanced_for_statement" => Ok(Stmt::Foreach {
                var_type: self.text(&self.required(node, "type")?).to_string(),
                var: self.text(&self.required(node, "name")?).to_string(),
                iterable: self.expr(&self.required(node, "value")?)?,
                body: self.body(&self.required(node, "body")?)?,
            }),
            "switch_expression" | "switch_statement" => self.switch_stmt(node),
            "break_statement" => Ok(Stmt::Break),
            "continue_statement" => Ok(Stmt::Continue),
            "return_statement" => {
                let value = match first_named(node) {
                    Some(v) => Some(self.expr(&v)?),
                    None => None,
                };
                Ok(Stmt::Return(value))
            }
            "throw_statement" => {
                let value = first_named(node).ok_or_else(|| LoweringError::MissingField {
                    kind: describe(node),
                    field: "expression",
                    line: line_of(node),
                })?;
                Ok(Stmt::Throw(self.expr(&value)?))
            }
            "labeled_statement" => match named_children(node).last() {
                Some(inner) if inner.kind() != "identifier" => self.stmt(inner),
                _ => Ok(Stmt::Empty),
            },
            _ => self.unsupported(node),
        }
    }

    fn for_stmt(&self, node: &Node) -> LResult<Stmt> {
        let init = field_children(node, "init")
            .iter()
            .map(|i| {
                if i.kind() == "local_variable_declaration" {
                    self.var_decl(i)
                } else {
                    self.expr(i)
                }
            })
            .collect::<LResult<Vec<_>>>()?;

        let cond = node
            .child_by_field_name("condition")
            .ok_or(LoweringError::MissingForCondition {
                line: line_of(node),
            })?;
        let cond = self.expr(&cond)?;

        let update = field_children(node, "update")
            .iter()
            .map(|u| self.expr(u))
            .collect::<LResult<Vec<_>>>()?;

        Ok(Stmt::For {
            init,
            cond,
            update,
            body: self.body(&self.required(node, "body")?)?,
        })
    }

    fn switch_stmt(&self, node: &Node) -> LResult<Stmt> {
        let selector = self.condition(node)?;
        let block = self.required(node, "body")?;

        let mut entries = Vec::new();
        for group in named_children(&block) {
            match group.kind() {
                "switch_block_statement_group" => {
                    let mut labels = Vec::new();
                    let mut body = Vec::new();
                    for child in named_children(&group) {
                        if child.kind() == "switch_label" {
                            labels.extend(self.switch_labels(&child)?);
                        } else {
                            body.push(self.stmt(&child)?);
                        }
                    }
                    push_entries(&mut entries, labels, body);
                }
                "switch_rule" => {
                    let children = named_children(&group);
                    let mut labels = Vec::new();
                    let mut body = Vec::new();
                    for child in &children {
                        match child.kind() {
                            "switch_label" => labels.extend(self.switch_labels(child)?),
                            "block" => body.extend(self.block_items(child)?),
                            _ => body.push(self.stmt(child)?),
                        }
                    }
                    // arrow rules never fall through
                    if !matches!(body.last(), Some(Stmt::Throw(_)) | Some(Stmt::Return(_))) {
                        body.push(Stmt::Break);
                    }
                    push_entries(&mut entries, labels, body);
                }
                _ => return self.unsupported(&group),
            }
        }

        Ok(Stmt::Switch { selector, entries })
    }

    /// `case a, b` yields two labels, `default` yields `None`
    fn switch_labels(&self, node: &Node) -> LResult<Vec<Option<Expr>>> {
        let values = named_children(node);
        if values.is_empty() {
            return Ok(vec![None]);
        }
        values
            .iter()
            .map(|v| match v.kind() {
                "pattern" | "type_pattern" | "record_pattern" | "guard" => self.unsupported(v),
                _ => self.expr(v).map(Some),
            })
            .collect()
    }

    /// Condition field with its mandatory parentheses stripped
    fn condition(&self, node: &Node) -> LResult<Expr> {
        let cond = self.required(node, "condition")?;
        match (cond.kind(), first_named(&cond)) {
            ("parenthesized_expression", Some(inner)) => self.expr(&inner),
            _ => self.expr(&cond),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    fn expr(&self, node: &Node) -> LResult<Expr> {
        let kind = node.kind();
        if LITERALS.contains(&kind) {
            return Ok(Expr::Literal(self.text(node).to_string()));
        }

        match kind {
            "identifier" => Ok(Expr::Name(self.text(node).to_string())),
            "this" => Ok(Expr::This),
            "super" => Ok(Expr::Literal("super".to_string())),
            "parenthesized_expression" => {
                let inner = first_named(node).ok_or_else(|| LoweringError::MissingField {
                    kind: describe(node),
                    field: "expression",
                    line: line_of(node),
                })?;
                Ok(Expr::Paren(Box::new(self.expr(&inner)?)))
            }
            "assignment_expression" => {
                let target = self.name_target(&self.required(node, "left")?)?;
                let op_node = self.required(node, "operator")?;
                let op = AssignOp::parse(self.text(&op_node))
                    .map_or_else(|| self.unsupported(&op_node), Ok)?;
                Ok(Expr::Assign {
                    target,
                    op,
                    value: Box::new(self.expr(&self.required(node, "right")?)?),
                })
            }
            "update_expression" => self.update(node),
            "unary_expression" => {
                let op_node = self.required(node, "operator")?;
                let op = UnaryOp::parse(self.text(&op_node))
                    .map_or_else(|| self.unsupported(&op_node), Ok)?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(self.expr(&self.required(node, "operand")?)?),
                })
            }
            "binary_expression" => {
                let op_node = self.required(node, "operator")?;
                let op = BinaryOp::parse(self.text(&op_node))
                    .map_or_else(|| self.unsupported(&op_node), Ok)?;
                Ok(Expr::binary(
                    op,
                    self.expr(&self.required(node, "left")?)?,
                    self.expr(&self.required(node, "right")?)?,
                ))
            }
            "ternary_expression" => Ok(Expr::Conditional {
                cond: Box::new(self.expr(&self.required(node, "condition")?)?),
                then: Box::new(self.expr(&self.required(node, "consequence")?)?),
                else_: Box::new(self.expr(&self.required(node, "alternative")?)?),
            }),
            "method_invocation" => {
                let receiver = match node.child_by_field_name("object") {
                    Some(obj) => Some(Box::new(self.expr(&obj)?)),
                    None => None,
                };
                Ok(Expr::Call {
                    receiver,
                    name: self.text(&self.required(node, "name")?).to_string(),
                    args: self.arguments(&self.required(node, "arguments")?)?,
                })
            }
            "field_access" => Ok(Expr::FieldAccess {
                object: Box::new(self.expr(&self.required(node, "object")?)?),
                field: self.text(&self.required(node, "field")?).to_string(),
            }),
            "array_access" => Ok(Expr::ArrayAccess {
                array: Box::new(self.expr(&self.required(node, "array")?)?),
                index: Box::new(self.expr(&self.required(node, "index")?)?),
            }),
            "cast_expression" => Ok(Expr::Cast {
                ty: self.text(&self.required(node, "type")?).to_string(),
                expr: Box::new(self.expr(&self.required(node, "value")?)?),
            }),
            "object_creation_expression" => {
                if !children_of_kind(node, "class_body").is_empty() {
                    return self.unsupported(node);
                }
                Ok(Expr::New {
                    ty: self.text(&self.required(node, "type")?).to_string(),
                    args: self.arguments(&self.required(node, "arguments")?)?,
                })
            }
            "array_creation_expression" => {
                let dims = children_of_kind(node, "dimensions_expr")
                    .iter()
                    .map(|d| match first_named(d) {
                        Some(e) => self.expr(&e),
                        None => self.unsupported(d),
                    })
                    .collect::<LResult<Vec<_>>>()?;
                let extra_dims = children_of_kind(node, "dimensions")
                    .iter()
                    .map(|d| self.text(d).matches('[').count())
                    .sum();
                let init = match node.child_by_field_name("value") {
                    Some(v) => Some(self.initializer_items(&v)?),
                    None => None,
                };
                Ok(Expr::NewArray {
                    ty: self.text(&self.required(node, "type")?).to_string(),
                    dims,
                    extra_dims,
                    init,
                })
            }
            "array_initializer" => Ok(Expr::ArrayInit(self.initializer_items(node)?)),
            "instanceof_expression" => {
                let left = self.required(node, "left")?;
                let ty = match (
                    node.child_by_field_name("right"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(ty), Some(name)) => format!("{} {}", self.text(&ty), self.text(&name)),
                    (Some(ty), None) => self.text(&ty).to_string(),
                    _ => return self.unsupported(node),
                };
                Ok(Expr::InstanceOf {
                    expr: Box::new(self.expr(&left)?),
                    ty,
                })
            }
            _ => self.unsupported(node),
        }
    }

    fn update(&self, node: &Node) -> LResult<Expr> {
        let operand = first_named(node).ok_or_else(|| LoweringError::MissingField {
            kind: describe(node),
            field: "operand",
            line: line_of(node),
        })?;
        let target = self.name_target(&operand)?;

        let prefix = node.child(0).map_or(false, |c| !c.is_named());
        let token = self.text(node).replace(self.text(&operand), "");
        let op = match (prefix, token.trim()) {
            (true, "++") => UpdateOp::PreInc,
            (true, "--") => UpdateOp::PreDec,
            (false, "++") => UpdateOp::PostInc,
            (false, "--") => UpdateOp::PostDec,
            _ => return self.unsupported(node),
        };
        Ok(Expr::Update { op, target })
    }

    /// Assignment targets must be plain identifiers
    fn name_target(&self, node: &Node) -> LResult<String> {
        if node.kind() == "identifier" {
            Ok(self.text(node).to_string())
        } else {
            Err(LoweringError::NonNameTarget {
                target: self.text(node).to_string(),
                line: line_of(node),
            })
        }
    }

    fn var_decl(&self, node: &Node) -> LResult<Expr> {
        let ty = self.text(&self.required(node, "type")?).to_string();
        let declarators = field_children(node, "declarator")
            .iter()
            .map(|d| {
                let name = self.text(&self.required(d, "name")?).to_string();
                let init = match d.child_by_field_name("value") {
                    Some(v) => Some(self.expr(&v)?),
                    None => None,
                };
                Ok(Declarator { name, init })
            })
            .collect::<LResult<Vec<_>>>()?;
        Ok(Expr::VarDecl { ty, declarators })
    }

    /// `this(...)` / `super(...)` at the top of a constructor
    fn constructor_call(&self, node: &Node) -> LResult<Expr> {
        let receiver = match node.child_by_field_name("object") {
            Some(obj) => Some(Box::new(self.expr(&obj)?)),
            None => None,
        };
        Ok(Expr::Call {
            receiver,
            name: self
                .text(&self.required(node, "constructor")?)
                .to_string(),
            args: self.arguments(&self.required(node, "arguments")?)?,
        })
    }

    fn arguments(&self, node: &Node) -> LResult<Vec<Expr>> {
        named_children(node).iter().map(|a| self.expr(a)).collect()
    }

    fn initializer_items(&self, node: &Node) -> LResult<Vec<Expr>> {
        named_children(node).iter().map(|i| self.expr(i)).collect()
    }
}

/// One entry per label; only the last label owns the statements
fn push_entries(entries: &mut Vec<SwitchEntry>, labels: Vec<Option<Expr>>, body: Vec<Stmt>) {
    let count = labels.len();
    let mut body = Some(body);
    for (i, label) in labels.into_iter().enumerate() {
        let stmts = if i + 1 == count {
            body.take().unwrap_or_default()
        } else {
            Vec::new()
        };
        entries.push(SwitchEntry {
            label,
            body: stmts,
        });
    }
}

fn first_named<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    named_children(node).into_iter().next()
}

/// `try_statement` -> `try statement`
fn describe(node: &Node) -> String {
    node.kind().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lower_one(body: &str) -> LoweredProcedure {
        let src = format!("class T {{ void m(int a) {{ {} }} }}", body);
        let mut procs = JavaLowering::new().lower_source(&src).unwrap();
        assert_eq!(procs.len(), 1);
        procs.remove(0)
    }

    fn body_of(body: &str) -> Vec<Stmt> {
        lower_one(body).unwrap().body
    }

    #[test]
    fn test_method_names_are_qualified() {
        let src = r#"
            class Outer {
                Outer() { }
                void a() { }
                abstract void b();
                static class Inner { int c() { return 1; } }
            }
        "#;
        let names: Vec<String> = JavaLowering::new()
            .lower_source(src)
            .unwrap()
            .into_iter()
            .map(|p| p.unwrap().name)
            .collect();
        assert_eq!(names, vec!["Outer.Outer", "Outer.a", "Outer.Inner.c"]);
    }

    #[test]
    fn test_params_lowered() {
        let proc = lower_one("").unwrap();
        assert_eq!(
            proc.params,
            vec![Param {
                ty: "int".into(),
                name: "a".into()
            }]
        );
    }

    #[test]
    fn test_statements_render_like_source() {
        let body = body_of("int x = a + 1; x += 2; x++; foo(x, \"s\");");
        let texts: Vec<String> = body
            .iter()
            .map(|s| match s {
                Stmt::Expr(e) => e.to_string(),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(texts, vec!["int x = a + 1", "x += 2", "x++", "foo(x, \"s\")"]);
    }

    #[test]
    fn test_if_else_and_loops() {
        let body = body_of(
            "if (a > 0) x = 1; else { x = 2; } while (a < 3) a++; do { a--; } while (a > 0);",
        );
        assert!(matches!(&body[0], Stmt::If { else_: Some(e), then, .. } if e.len() == 1 && then.len() == 1));
        assert!(matches!(&body[1], Stmt::While { cond, .. } if cond.to_string() == "a < 3"));
        assert!(matches!(&body[2], Stmt::DoWhile { body, .. } if body.len() == 1));
    }

    #[test]
    fn test_for_and_foreach() {
        let body = body_of("for (int i = 0, j = 1; i < 3; i++, j--) { } for (String s : items) { }");
        match &body[0] {
            Stmt::For {
                init, cond, update, ..
            } => {
                assert_eq!(init.len(), 1);
                assert_eq!(init[0].to_string(), "int i = 0, j = 1");
                assert_eq!(cond.to_string(), "i < 3");
                assert_eq!(update.len(), 2);
            }
            other => panic!("expected for, got {:?}", other),
        }
        assert!(matches!(&body[1], Stmt::Foreach { var, var_type, .. } if var == "s" && var_type == "String"));
    }

    #[test]
    fn test_switch_groups_split_per_label() {
        let body = body_of("switch (a) { case 1: case 2: x(); break; default: y(); }");
        match &body[0] {
            Stmt::Switch { entries, .. } => {
                assert_eq!(entries.len(), 3);
                assert!(entries[0].body.is_empty());
                assert_eq!(entries[1].body.len(), 2);
                assert!(entries[2].label.is_none());
            }
            other => panic!("expected switch, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_rule_gets_implicit_break() {
        let body = body_of("switch (a) { case 1 -> x(); default -> { y(); } }");
        match &body[0] {
            Stmt::Switch { entries, .. } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].body.last(), Some(&Stmt::Break));
                assert_eq!(entries[1].body.last(), Some(&Stmt::Break));
            }
            other => panic!("expected switch, got {:?}", other),
        }
    }

    #[test]
    fn test_labeled_statement_unwrapped() {
        let body = body_of("outer: while (a > 0) { break outer; }");
        assert!(matches!(&body[0], Stmt::While { .. }));
    }

    #[test]
    fn test_non_name_target_rejected() {
        let skipped = lower_one("int[] arr = new int[3]; arr[0] = 1;").unwrap_err();
        assert_eq!(skipped.name, "T.m");
        assert!(matches!(
            skipped.error,
            LoweringError::NonNameTarget { ref target, .. } if target == "arr[0]"
        ));
    }

    #[test]
    fn test_for_without_condition_rejected() {
        let skipped = lower_one("for (;;) { }").unwrap_err();
        assert!(matches!(
            skipped.error,
            LoweringError::MissingForCondition { .. }
        ));
    }

    #[test]
    fn test_try_and_lambda_rejected() {
        let try_stmt = lower_one("try { a(); } catch (Exception e) { }").unwrap_err();
        assert!(matches!(
            try_stmt.error,
            LoweringError::Unsupported { ref kind, .. } if kind == "try statement"
        ));

        let lambda = lower_one("Runnable r = () -> {};").unwrap_err();
        assert!(matches!(
            lambda.error,
            LoweringError::Unsupported { ref kind, .. } if kind == "lambda expression"
        ));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = JavaLowering::new()
            .lower_source("class T { void m() { int x = ; } }")
            .unwrap_err();
        assert!(matches!(err, ProcgraphError::Parse(_)));
    }

    #[test]
    fn test_comments_dropped() {
        let body = body_of("// note\n x = 1; /* c */");
        assert_eq!(body.len(), 1);
    }
}
