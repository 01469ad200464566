//! Extract procedures use case

use crate::errors::Result;
use crate::features::parsing::domain::{LoweredProcedure, Procedure, SkippedProcedure};
use crate::features::parsing::ports::ProcedureSource;

/// Extract procedures use case
pub struct ExtractProceduresUseCase<S: ProcedureSource> {
    source: S,
}

impl<S: ProcedureSource> ExtractProceduresUseCase<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Lower every procedure, keeping rejected ones in the list
    pub fn execute(&self, text: &str) -> Result<Vec<LoweredProcedure>> {
        self.source.procedures(text)
    }

    /// Lower every procedure and split accepted from rejected
    pub fn execute_partitioned(
        &self,
        text: &str,
    ) -> Result<(Vec<Procedure>, Vec<SkippedProcedure>)> {
        let mut accepted = Vec::new();
        let mut skipped = Vec::new();
        for lowered in self.source.procedures(text)? {
            match lowered {
                Ok(p) => accepted.push(p),
                Err(s) => skipped.push(s),
            }
        }
        Ok((accepted, skipped))
    }

    pub fn language_name(&self) -> &'static str {
        self.source.language_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LoweringError;
    use crate::features::parsing::domain::Stmt;

    // Mock front-end for testing
    struct MockSource;

    impl ProcedureSource for MockSource {
        fn procedures(&self, _source: &str) -> Result<Vec<LoweredProcedure>> {
            Ok(vec![
                Ok(Procedure::new("A.ok", vec![Stmt::Empty])),
                Err(SkippedProcedure {
                    name: "A.bad".into(),
                    line: 3,
                    error: LoweringError::MissingForCondition { line: 4 },
                }),
            ])
        }

        fn supports_extension(&self, ext: &str) -> bool {
            ext == "mock"
        }

        fn language_name(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn test_execute_partitioned() {
        let use_case = ExtractProceduresUseCase::new(MockSource);
        let (accepted, skipped) = use_case.execute_partitioned("").unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "A.ok");
        assert_eq!(skipped[0].name, "A.bad");
        assert_eq!(use_case.language_name(), "mock");
    }

    #[test]
    fn test_java_source_through_use_case() {
        let use_case =
            ExtractProceduresUseCase::new(crate::features::parsing::infrastructure::JavaLowering);
        let procs = use_case
            .execute("class A { void m() { int x = 1; } }")
            .unwrap();
        assert_eq!(procs.len(), 1);
        assert!(procs[0].is_ok());
    }
}
