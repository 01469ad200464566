//! Procedure AST
//!
//! Closed statement / expression model consumed by both graph builders.
//! Every node renders back to source-equivalent text through `Display`
//! (see render.rs), which is what ends up inside node labels.

use serde::Serialize;

use crate::errors::LoweringError;

/// One analysable procedure (method or constructor body)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Procedure {
    /// Qualified name, e.g. `Outer.Inner.run`
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    /// 1-indexed declaration line
    pub line: usize,
}

impl Procedure {
    pub fn new(name: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            body,
            line: 0,
        }
    }

    /// Short name (last segment of the qualified name)
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

/// A procedure the front-end refused to lower
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProcedure {
    pub name: String,
    pub line: usize,
    pub error: LoweringError,
}

/// Outcome of lowering one procedure
pub type LoweredProcedure = std::result::Result<Procedure, SkippedProcedure>;

// ═══════════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Expression statement (also local variable declarations)
    Expr(Expr),
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then: Vec<Stmt>,
        else_: Option<Vec<Stmt>>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    DoWhile {
        body: Vec<Stmt>,
        cond: Expr,
    },
    For {
        init: Vec<Expr>,
        cond: Expr,
        update: Vec<Expr>,
        body: Vec<Stmt>,
    },
    Foreach {
        var_type: String,
        var: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Switch {
        selector: Expr,
        entries: Vec<SwitchEntry>,
    },
    Break,
    Continue,
    Return(Option<Expr>),
    Throw(Expr),
    Empty,
}

/// One `case` / `default` label with the statements that follow it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchEntry {
    /// `None` for `default`
    pub label: Option<Expr>,
    pub body: Vec<Stmt>,
}

impl SwitchEntry {
    pub fn case(label: Expr, body: Vec<Stmt>) -> Self {
        Self {
            label: Some(label),
            body,
        }
    }

    pub fn default(body: Vec<Stmt>) -> Self {
        Self { label: None, body }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Name(String),
    /// Raw literal token (`42`, `"hi"`, `'c'`, `true`, `null`, `Foo.class`)
    Literal(String),
    This,
    Assign {
        target: String,
        op: AssignOp,
        value: Box<Expr>,
    },
    Update {
        op: UpdateOp,
        target: String,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Paren(Box<Expr>),
    Call {
        receiver: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
    FieldAccess {
        object: Box<Expr>,
        field: String,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        else_: Box<Expr>,
    },
    Cast {
        ty: String,
        expr: Box<Expr>,
    },
    New {
        ty: String,
        args: Vec<Expr>,
    },
    NewArray {
        ty: String,
        dims: Vec<Expr>,
        /// Empty `[]` pairs after the sized dimensions
        extra_dims: usize,
        init: Option<Vec<Expr>>,
    },
    ArrayInit(Vec<Expr>),
    InstanceOf {
        expr: Box<Expr>,
        ty: String,
    },
    /// Local variable declaration with one or more declarators
    VarDecl {
        ty: String,
        declarators: Vec<Declarator>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Expr>,
}

impl Expr {
    pub fn name(n: impl Into<String>) -> Self {
        Expr::Name(n.into())
    }

    pub fn lit(raw: impl Into<String>) -> Self {
        Expr::Literal(raw.into())
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Expr::Assign {
            target: target.into(),
            op: AssignOp::Assign,
            value: Box::new(value),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            receiver: None,
            name: name.into(),
            args,
        }
    }

    pub fn decl(ty: impl Into<String>, name: impl Into<String>, init: Option<Expr>) -> Self {
        Expr::VarDecl {
            ty: ty.into(),
            declarators: vec![Declarator {
                name: name.into(),
                init,
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

impl AssignOp {
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::Add,
            "-=" => AssignOp::Sub,
            "*=" => AssignOp::Mul,
            "/=" => AssignOp::Div,
            "%=" => AssignOp::Rem,
            "&=" => AssignOp::BitAnd,
            "|=" => AssignOp::BitOr,
            "^=" => AssignOp::BitXor,
            "<<=" => AssignOp::Shl,
            ">>=" => AssignOp::Shr,
            ">>>=" => AssignOp::UShr,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::UShr => ">>>=",
        }
    }

    /// Compound assignments read the target before writing it
    pub fn is_compound(&self) -> bool {
        !matches!(self, AssignOp::Assign)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UpdateOp {
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UpdateOp {
    pub fn is_prefix(&self) -> bool {
        matches!(self, UpdateOp::PreInc | UpdateOp::PreDec)
    }

    pub fn token(&self) -> &'static str {
        match self {
            UpdateOp::PreInc | UpdateOp::PostInc => "++",
            UpdateOp::PreDec | UpdateOp::PostDec => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
}

impl UnaryOp {
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "-" => UnaryOp::Neg,
            "+" => UnaryOp::Plus,
            "!" => UnaryOp::Not,
            "~" => UnaryOp::BitNot,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

impl BinaryOp {
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "&" => BinaryOp::BitAnd,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "<<" => BinaryOp::Shl,
            ">>" => BinaryOp::Shr,
            ">>>" => BinaryOp::UShr,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens_roundtrip() {
        for token in ["+", "<=", "&&", ">>>", "^"] {
            assert_eq!(BinaryOp::parse(token).unwrap().as_str(), token);
        }
        for token in ["=", "+=", ">>>="] {
            assert_eq!(AssignOp::parse(token).unwrap().as_str(), token);
        }
        assert!(BinaryOp::parse("instanceof").is_none());
    }

    #[test]
    fn test_compound_assignment() {
        assert!(!AssignOp::Assign.is_compound());
        assert!(AssignOp::Add.is_compound());
        assert!(AssignOp::UShr.is_compound());
    }

    #[test]
    fn test_simple_name() {
        let proc = Procedure::new("Outer.Inner.run", vec![]);
        assert_eq!(proc.simple_name(), "run");
        assert_eq!(Procedure::new("main", vec![]).simple_name(), "main");
    }
}
