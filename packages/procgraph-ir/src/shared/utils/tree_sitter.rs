//! Tree-sitter helpers
//!
//! Small accessors shared by the lowering passes.

use tree_sitter::Node;

/// Source text covered by a node
#[inline]
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// 1-indexed start line
#[inline]
pub fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Named children, skipping comments
pub fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !is_comment(c))
        .collect()
}

/// Named children of one kind
pub fn children_of_kind<'a>(node: &Node<'a>, kind: &str) -> Vec<Node<'a>> {
    named_children(node)
        .into_iter()
        .filter(|c| c.kind() == kind)
        .collect()
}

/// Every child registered under a field name (e.g. `declarator`)
pub fn field_children<'a>(node: &Node<'a>, field: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

#[inline]
pub fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment" | "comment")
}

/// First unnamed child whose kind is an operator token
pub fn operator_token<'a>(node: &Node<'a>, source: &'a str) -> Option<&'a str> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|c| !c.is_named())
        .map(|c| node_text(&c, source));
    found
}
