use crate::errors::Result;
use crate::features::parsing::domain::Procedure;
use crate::features::pdg::infrastructure::ProgramDependenceGraph;
use crate::features::pdg::ports::DependenceAnalyzer;

pub struct BuildPdgUseCase<A: DependenceAnalyzer> {
    analyzer: A,
}

impl<A: DependenceAnalyzer> BuildPdgUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn execute(&self, procedure: &Procedure) -> Result<ProgramDependenceGraph> {
        self.analyzer.build_pdg(procedure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PdgConfig;
    use crate::features::parsing::domain::{Expr, Stmt};
    use crate::features::pdg::infrastructure::PdgAnalyzer;

    #[test]
    fn test_config_drops_data_edges() {
        let procedure = Procedure::new(
            "T.m",
            vec![
                Stmt::Expr(Expr::assign("x", Expr::lit("1"))),
                Stmt::Expr(Expr::call("use", vec![Expr::name("x")])),
            ],
        );

        let full = BuildPdgUseCase::new(PdgAnalyzer::default())
            .execute(&procedure)
            .unwrap();
        assert_eq!(full.summary().data_edges, 1);
        assert_eq!(full.summary().control_edges, 2);

        let control_only = BuildPdgUseCase::new(PdgAnalyzer::new(
            PdgConfig::default().include_data(false),
        ))
        .execute(&procedure)
        .unwrap();
        assert_eq!(control_only.summary().data_edges, 0);
        assert_eq!(control_only.summary().control_edges, 2);
    }
}
