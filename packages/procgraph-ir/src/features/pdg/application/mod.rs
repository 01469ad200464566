//! PDG Application Layer

mod build_pdg;

pub use build_pdg::BuildPdgUseCase;
