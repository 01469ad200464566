//! Node labels
//!
//! A label is the identity of a graph node and doubles as its DOT id, so the
//! surrounding double quotes are part of the text.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Synthetic CFG entry
pub const START_LABEL: &str = "Start";
/// Synthetic CFG exit
pub const STOP_LABEL: &str = "Stop";
/// Synthetic PDG root (the method-level control node)
pub const ENTRY_LABEL: &str = "Entry";

/// Opaque node identifier: `"(<seq>) <escaped source>"` or a synthetic name.
///
/// Two labels are equal iff their text is identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeLabel(Arc<str>);

impl NodeLabel {
    /// Wrap already formatted label text
    pub fn from_raw(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    pub fn start() -> Self {
        Self::from_raw(START_LABEL)
    }

    pub fn stop() -> Self {
        Self::from_raw(STOP_LABEL)
    }

    pub fn entry() -> Self {
        Self::from_raw(ENTRY_LABEL)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `Start`, `Stop` and `Entry`
    pub fn is_synthetic(&self) -> bool {
        matches!(self.as_str(), START_LABEL | STOP_LABEL | ENTRY_LABEL)
    }

    /// Sequence number of a labeled node, `None` for synthetic labels
    pub fn sequence(&self) -> Option<u64> {
        let rest = self.0.strip_prefix("\"(")?;
        let end = rest.find(')')?;
        rest[..end].parse().ok()
    }

    /// Escaped source fragment without the sequence prefix and quotes
    pub fn fragment(&self) -> &str {
        match self.0.strip_prefix("\"(").and_then(|r| r.split_once(") ")) {
            Some((_, tail)) => tail.strip_suffix('"').unwrap_or(tail),
            None => &self.0,
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NodeLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_raw(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_and_fragment() {
        let label = NodeLabel::from_raw("\"(12) x = 1;\"");
        assert_eq!(label.sequence(), Some(12));
        assert_eq!(label.fragment(), "x = 1;");
        assert!(!label.is_synthetic());
    }

    #[test]
    fn test_synthetic_labels() {
        assert!(NodeLabel::start().is_synthetic());
        assert_eq!(NodeLabel::stop().sequence(), None);
        assert_eq!(NodeLabel::entry().fragment(), "Entry");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let label = NodeLabel::from_raw("\"(1) foo();\"");
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, r#""\"(1) foo();\"""#);
        let back: NodeLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}
