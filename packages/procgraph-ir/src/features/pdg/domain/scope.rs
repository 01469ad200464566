//! Scope model for the PDG walk
//!
//! Arena of control nodes and variable definitions addressed by handles.
//! A control node owns one or more mutually exclusive blocks (then / else,
//! one per switch case); each block is an ordered list of nested control
//! nodes and definitions. Popped nodes stay reachable from their parent's
//! block so later lookups can descend into them.

use serde::Serialize;

use crate::shared::models::NodeLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ControlNodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefinitionId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControlKind {
    Method,
    If,
    While,
    DoWhile,
    For,
    Foreach,
    Switch,
    SwitchCase,
}

impl ControlKind {
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            ControlKind::While | ControlKind::DoWhile | ControlKind::For | ControlKind::Foreach
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScopeEntry {
    Control(ControlNodeId),
    Definition(DefinitionId),
}

/// Ordered child entries of one exclusive branch
#[derive(Debug, Clone, Default, Serialize)]
pub struct Block {
    entries: Vec<ScopeEntry>,
}

impl Block {
    pub fn entries(&self) -> &[ScopeEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlNode {
    pub kind: ControlKind,
    pub label: NodeLabel,
    pub parent: Option<ControlNodeId>,
    blocks: Vec<Block>,
}

impl ControlNode {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block new entries go to (always the last one)
    pub fn active_block(&self) -> &Block {
        // blocks is never empty: one is created with the node
        &self.blocks[self.blocks.len() - 1]
    }
}

/// A read of a definition; `seq` orders reads within one procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub node: NodeLabel,
    pub seq: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableDefinition {
    pub variable: String,
    pub defining_node: NodeLabel,
    pub owner: ControlNodeId,
    references: Vec<Reference>,
}

impl VariableDefinition {
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Record a reading node once; returns false if it was already known
    pub fn add_reference(&mut self, node: NodeLabel, seq: u64) -> bool {
        if self.references.iter().any(|r| r.node == node) {
            return false;
        }
        self.references.push(Reference { node, seq });
        true
    }
}

/// Outcome of a backward lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub definitions: Vec<DefinitionId>,
    /// Open node whose block held the dominating definition; `None` when
    /// the scan ran past the root without one
    pub stopped_at: Option<ControlNodeId>,
}

impl Resolution {
    /// True when a definition inside `ancestor` dominates the read
    pub fn dominated_within(&self, arena: &ScopeArena, ancestor: ControlNodeId) -> bool {
        self.stopped_at.is_some_and(|node| arena.is_within(node, ancestor))
    }
}

/// Arena owning every control node and definition of one builder run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScopeArena {
    nodes: Vec<ControlNode>,
    definitions: Vec<VariableDefinition>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_root(&mut self, label: NodeLabel) -> ControlNodeId {
        self.push_node(ControlKind::Method, label, None)
    }

    /// Create a nested control node in the parent's active block
    pub fn open_child(
        &mut self,
        parent: ControlNodeId,
        kind: ControlKind,
        label: NodeLabel,
    ) -> ControlNodeId {
        let id = self.push_node(kind, label, Some(parent));
        self.active_block_mut(parent)
            .entries
            .push(ScopeEntry::Control(id));
        id
    }

    fn push_node(
        &mut self,
        kind: ControlKind,
        label: NodeLabel,
        parent: Option<ControlNodeId>,
    ) -> ControlNodeId {
        let id = ControlNodeId(self.nodes.len());
        self.nodes.push(ControlNode {
            kind,
            label,
            parent,
            blocks: vec![Block::default()],
        });
        id
    }

    /// Open an exclusive alternative branch (else, next case)
    pub fn start_new_block(&mut self, id: ControlNodeId) {
        self.nodes[id.0].blocks.push(Block::default());
    }

    /// Append a definition to the owner's active block
    pub fn define(
        &mut self,
        owner: ControlNodeId,
        variable: &str,
        defining_node: NodeLabel,
    ) -> DefinitionId {
        let id = DefinitionId(self.definitions.len());
        self.definitions.push(VariableDefinition {
            variable: variable.to_string(),
            defining_node,
            owner,
            references: Vec::new(),
        });
        self.active_block_mut(owner)
            .entries
            .push(ScopeEntry::Definition(id));
        id
    }

    fn active_block_mut(&mut self, id: ControlNodeId) -> &mut Block {
        let blocks = &mut self.nodes[id.0].blocks;
        let last = blocks.len() - 1;
        &mut blocks[last]
    }

    pub fn node(&self, id: ControlNodeId) -> &ControlNode {
        &self.nodes[id.0]
    }

    pub fn definition(&self, id: DefinitionId) -> &VariableDefinition {
        &self.definitions[id.0]
    }

    pub fn definition_mut(&mut self, id: DefinitionId) -> &mut VariableDefinition {
        &mut self.definitions[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Definitions of `variable` visible from the innermost open node.
    ///
    /// Scans each open node's active block backward, descending into closed
    /// nested constructs, and stops at the first top-level definition.
    /// Sibling blocks of an open node are never consulted.
    pub fn resolve(&self, innermost: ControlNodeId, variable: &str) -> Resolution {
        let mut definitions = Vec::new();
        let mut node = innermost;
        let mut skip = None;

        let stopped_at = loop {
            let current = self.node(node);
            if self.scan_block(current.active_block(), variable, skip, &mut definitions) {
                break Some(node);
            }
            match current.parent {
                Some(parent) => {
                    skip = Some(node);
                    node = parent;
                }
                None => break None,
            }
        };
        Resolution {
            definitions,
            stopped_at,
        }
    }

    /// Last definitions of `variable` inside a (closed) node, over all its blocks
    pub fn last_definitions_in(&self, id: ControlNodeId, variable: &str) -> Vec<DefinitionId> {
        let mut found = Vec::new();
        self.collect_nested(id, variable, &mut found);
        found
    }

    fn collect_nested(&self, id: ControlNodeId, variable: &str, found: &mut Vec<DefinitionId>) {
        for block in self.node(id).blocks() {
            self.scan_block(block, variable, None, found);
        }
    }

    /// Returns true when a top-level definition ended the scan
    fn scan_block(
        &self,
        block: &Block,
        variable: &str,
        skip: Option<ControlNodeId>,
        found: &mut Vec<DefinitionId>,
    ) -> bool {
        for entry in block.entries.iter().rev() {
            match *entry {
                ScopeEntry::Definition(d) => {
                    if self.definition(d).variable == variable {
                        found.push(d);
                        return true;
                    }
                }
                ScopeEntry::Control(c) if Some(c) == skip => {}
                ScopeEntry::Control(c) => self.collect_nested(c, variable, found),
            }
        }
        false
    }

    /// True when `id` is `ancestor` or nested inside it
    pub fn is_within(&self, id: ControlNodeId, ancestor: ControlNodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            if c == ancestor {
                return true;
            }
            cursor = self.node(c).parent;
        }
        false
    }

    /// Variables defined anywhere in the subtree of `id`, first-definition order
    pub fn variables_defined_within(&self, id: ControlNodeId) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut stack = vec![id];
        let mut ordered = Vec::new();

        while let Some(node) = stack.pop() {
            for block in self.node(node).blocks() {
                for entry in block.entries() {
                    match *entry {
                        ScopeEntry::Definition(d) => ordered.push(d),
                        ScopeEntry::Control(c) => stack.push(c),
                    }
                }
            }
        }

        // definition ids grow with visit order
        ordered.sort();
        for d in ordered {
            let variable = &self.definition(d).variable;
            if !out.contains(variable) {
                out.push(variable.clone());
            }
        }
        out
    }
}
