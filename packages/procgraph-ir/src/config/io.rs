//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema. Conversion into `AnalysisConfig` lives in
//! analysis_config.rs.

use super::stage_configs::*;
use serde::{Deserialize, Serialize};

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyse procedures in parallel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg: Option<CfgConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdg: Option<PdgConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emit: Option<EmitConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderConfig>,
}
