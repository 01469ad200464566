//! Error types for procgraph-ir
//!
//! Provides unified error handling across the crate.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for procgraph-ir operations
#[derive(Debug, Error)]
pub enum ProcgraphError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Procedure uses a construct outside the analysed subset
    #[error("Lowering error: {0}")]
    Lowering(#[from] LoweringError),

    /// Graph construction error
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External renderer failed
    #[error("Render error: {0}")]
    Render(String),
}

impl ProcgraphError {
    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        ProcgraphError::Parse(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        ProcgraphError::Render(msg.into())
    }
}

/// Precondition violations found while lowering a syntax tree into a `Procedure`.
///
/// The analysis assumes simple scalar-named lvalues and fully specified loop
/// headers. Anything else rejects the whole procedure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum LoweringError {
    #[error("unsupported {kind} at line {line}")]
    Unsupported { kind: String, line: usize },

    #[error("`{kind}` at line {line} is missing its `{field}`")]
    MissingField {
        kind: String,
        field: &'static str,
        line: usize,
    },

    #[error("assignment target `{target}` at line {line} is not a simple name")]
    NonNameTarget { target: String, line: usize },

    #[error("`for` loop at line {line} has no condition")]
    MissingForCondition { line: usize },
}

/// Errors raised while building a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("node limit of {limit} exceeded")]
    NodeLimitExceeded { limit: usize },
}

/// Result type alias for procgraph operations
pub type Result<T> = std::result::Result<T, ProcgraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowering_error_converts() {
        let err: ProcgraphError = LoweringError::MissingForCondition { line: 3 }.into();
        assert!(matches!(err, ProcgraphError::Lowering(_)));
        assert_eq!(
            err.to_string(),
            "Lowering error: `for` loop at line 3 has no condition"
        );
    }

    #[test]
    fn test_node_limit_message() {
        let err = AnalysisError::NodeLimitExceeded { limit: 10 };
        assert_eq!(err.to_string(), "node limit of 10 exceeded");
    }
}
