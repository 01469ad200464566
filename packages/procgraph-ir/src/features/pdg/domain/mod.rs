//! PDG domain models
//!
//! Scope tree used while walking a procedure, plus the dependency filter
//! shared by the slicing queries.

pub mod scope;

pub use scope::{
    Block, ControlKind, ControlNode, ControlNodeId, DefinitionId, Reference, Resolution, ScopeArena,
    ScopeEntry, VariableDefinition,
};

/// Which dependency edges a query follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DependencyType {
    /// Control dependency (nesting)
    Control,
    /// Data dependency (def-use)
    Data,
    /// Both control and data
    Both,
}

impl DependencyType {
    pub fn includes_control(&self) -> bool {
        matches!(self, DependencyType::Control | DependencyType::Both)
    }

    pub fn includes_data(&self) -> bool {
        matches!(self, DependencyType::Data | DependencyType::Both)
    }
}
