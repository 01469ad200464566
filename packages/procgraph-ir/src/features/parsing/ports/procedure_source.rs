//! Procedure source port
//!
//! Defines the contract for turning source text into analysable procedures.

use crate::errors::Result;
use crate::features::parsing::domain::LoweredProcedure;

/// Front-end abstraction: source text in, lowered procedures out
pub trait ProcedureSource: Send + Sync {
    /// Lower every procedure of a compilation unit.
    ///
    /// A syntax error fails the whole unit; a procedure using an unsupported
    /// construct is returned as `Err(SkippedProcedure)` in the list.
    fn procedures(&self, source: &str) -> Result<Vec<LoweredProcedure>>;

    /// Check if this front-end handles the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
