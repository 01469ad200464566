//! Node label generation
//!
//! Every statement visited by a graph builder receives a label of the form
//! `"(<seq>) <source>"`. The sequence counter is per builder instance and
//! starts at 1, so two builders run over the same procedure agree on labels.

use std::borrow::Cow;
use std::fmt::Display;

use crate::errors::AnalysisError;
use crate::shared::models::NodeLabel;

/// Per-procedure label factory
#[derive(Debug, Clone)]
pub struct NodeLabeler {
    next: u64,
    limit: Option<usize>,
}

impl NodeLabeler {
    pub fn new() -> Self {
        Self {
            next: 1,
            limit: None,
        }
    }

    /// Fail with `NodeLimitExceeded` once more than `limit` labels are issued
    pub fn with_limit(limit: usize) -> Self {
        Self {
            next: 1,
            limit: Some(limit),
        }
    }

    /// Issue the next label for a source fragment
    pub fn label(&mut self, fragment: impl Display) -> Result<NodeLabel, AnalysisError> {
        if let Some(limit) = self.limit {
            if self.issued() >= limit {
                return Err(AnalysisError::NodeLimitExceeded { limit });
            }
        }

        let text = fragment.to_string();
        let label = format!("\"({}) {}\"", self.next, escape_quotes(&text));
        self.next += 1;
        Ok(NodeLabel::from_raw(label))
    }

    /// Labels issued so far
    pub fn issued(&self) -> usize {
        (self.next - 1) as usize
    }
}

impl Default for NodeLabeler {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape `"` as `\"` so the fragment can sit inside a quoted DOT id
pub fn escape_quotes(text: &str) -> Cow<'_, str> {
    if text.contains('"') {
        Cow::Owned(text.replace('"', "\\\""))
    } else {
        Cow::Borrowed(text)
    }
}
