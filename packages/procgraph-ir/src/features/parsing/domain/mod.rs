//! Parsing domain models

mod ast;
pub mod render;

pub use ast::{
    AssignOp, BinaryOp, Declarator, Expr, LoweredProcedure, Param, Procedure, SkippedProcedure,
    Stmt, SwitchEntry, UnaryOp, UpdateOp,
};
pub use render::node_text;
