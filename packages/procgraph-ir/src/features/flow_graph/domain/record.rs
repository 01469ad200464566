//! Open control records of the CFG walk

use crate::shared::models::NodeLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    If,
    While,
    DoWhile,
    For,
    Foreach,
    Switch,
}

impl RecordKind {
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            RecordKind::While | RecordKind::DoWhile | RecordKind::For | RecordKind::Foreach
        )
    }
}

/// A control construct whose continuation is not known yet
#[derive(Debug, Clone)]
pub struct ControlRecord {
    pub kind: RecordKind,
    /// Labels that flow into whatever statement follows the construct
    pub exits: Vec<NodeLabel>,
    /// Do-while re-entry point (first node of the body)
    pub loop_target: Option<NodeLabel>,
}

impl ControlRecord {
    pub fn new(kind: RecordKind, exits: Vec<NodeLabel>) -> Self {
        Self {
            kind,
            exits,
            loop_target: None,
        }
    }

    /// Do-while still waiting for its first body node
    pub fn awaits_loop_target(&self) -> bool {
        self.kind == RecordKind::DoWhile && self.loop_target.is_none()
    }
}
