//! Configuration System
//!
//! Two-tier configuration:
//! - Level 1: Preset - Simple one-liner
//! - Level 2: Stage override / YAML - Partial adjustment
//!
//! # Examples
//!
//! ```rust,ignore
//! use procgraph_ir::config::{AnalysisConfig, DataEdgeStyle, Preset};
//!
//! let config = AnalysisConfig::preset(Preset::Full)
//!     .pdg(|c| c.rank_by_depth(false))
//!     .emit(|e| e.data_edge_style(DataEdgeStyle::Dashed));
//! config.validate()?;
//!
//! let config = AnalysisConfig::from_yaml_file("procgraph.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod preset;
pub mod stage_configs;

// Re-exports
pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, ConfigOverrides};
pub use preset::Preset;
pub use stage_configs::{CfgConfig, DataEdgeStyle, EmitConfig, PdgConfig, RenderConfig};
