//! Source rendering
//!
//! `Display` for expressions plus the fixed texts the builders put into node
//! labels (`if (c)`, `case 1`, `x = 1;`, ...). Both builders go through these
//! helpers so a construct always renders the same way.

use std::fmt::{self, Display, Formatter, Write};

use super::ast::{Declarator, Expr};

fn write_list(f: &mut Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Name(n) => f.write_str(n),
            Expr::Literal(raw) => f.write_str(raw),
            Expr::This => f.write_str("this"),
            Expr::Assign { target, op, value } => {
                write!(f, "{} {} {}", target, op.as_str(), value)
            }
            Expr::Update { op, target } => {
                if op.is_prefix() {
                    write!(f, "{}{}", op.token(), target)
                } else {
                    write!(f, "{}{}", target, op.token())
                }
            }
            Expr::Unary { op, operand } => write!(f, "{}{}", op.as_str(), operand),
            Expr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.as_str(), rhs),
            Expr::Paren(inner) => write!(f, "({})", inner),
            Expr::Call {
                receiver,
                name,
                args,
            } => {
                if let Some(recv) = receiver {
                    write!(f, "{}.", recv)?;
                }
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                f.write_char(')')
            }
            Expr::FieldAccess { object, field } => write!(f, "{}.{}", object, field),
            Expr::ArrayAccess { array, index } => write!(f, "{}[{}]", array, index),
            Expr::Conditional { cond, then, else_ } => {
                write!(f, "{} ? {} : {}", cond, then, else_)
            }
            Expr::Cast { ty, expr } => write!(f, "({}) {}", ty, expr),
            Expr::New { ty, args } => {
                write!(f, "new {}(", ty)?;
                write_list(f, args)?;
                f.write_char(')')
            }
            Expr::NewArray {
                ty,
                dims,
                extra_dims,
                init,
            } => {
                write!(f, "new {}", ty)?;
                for d in dims {
                    write!(f, "[{}]", d)?;
                }
                for _ in 0..*extra_dims {
                    f.write_str("[]")?;
                }
                if let Some(items) = init {
                    f.write_str(" ")?;
                    write_array_init(f, items)?;
                }
                Ok(())
            }
            Expr::ArrayInit(items) => write_array_init(f, items),
            Expr::InstanceOf { expr, ty } => write!(f, "{} instanceof {}", expr, ty),
            Expr::VarDecl { ty, declarators } => {
                write!(f, "{} ", ty)?;
                for (i, d) in declarators.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", d)?;
                }
                Ok(())
            }
        }
    }
}

fn write_array_init(f: &mut Formatter<'_>, items: &[Expr]) -> fmt::Result {
    if items.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    write_list(f, items)?;
    f.write_str(" }")
}

impl Display for Declarator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.init {
            Some(init) => write!(f, "{} = {}", self.name, init),
            None => f.write_str(&self.name),
        }
    }
}

/// Label texts for statement-level nodes
pub mod node_text {
    use super::super::ast::Expr;

    /// `x = 1;`
    pub fn statement(expr: &Expr) -> String {
        format!("{};", expr)
    }

    /// `for` initializers carry no trailing semicolon
    pub fn for_init(expr: &Expr) -> String {
        expr.to_string()
    }

    pub fn if_header(cond: &Expr) -> String {
        format!("if ({})", cond)
    }

    /// Header of `while` loops and the trailing condition of `do`-`while`
    pub fn while_header(cond: &Expr) -> String {
        format!("while ({})", cond)
    }

    pub fn for_header(cond: &Expr) -> String {
        format!("for ({})", cond)
    }

    pub fn foreach_header(var_type: &str, var: &str, iterable: &Expr) -> String {
        format!("foreach ({} {} : {})", var_type, var, iterable)
    }

    pub fn switch_header(selector: &Expr) -> String {
        format!("switch ({})", selector)
    }

    pub fn case_label(label: Option<&Expr>) -> String {
        match label {
            Some(e) => format!("case {}", e),
            None => "default".to_string(),
        }
    }

    pub fn return_stmt(value: Option<&Expr>) -> String {
        match value {
            Some(v) => format!("return {};", v),
            None => "return;".to_string(),
        }
    }

    pub fn throw_stmt(value: &Expr) -> String {
        format!("throw {};", value)
    }
}
