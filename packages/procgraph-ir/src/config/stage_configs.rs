//! Per-stage configuration
//!
//! One struct per stage: CFG, PDG, emitter and external renderer.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;

const MAX_NODES_LIMIT: usize = 100_000;

fn validate_max_nodes(field: &str, value: usize) -> ConfigResult<()> {
    if value == 0 || value > MAX_NODES_LIMIT {
        return Err(ConfigError::range_with_hint(
            field,
            value,
            1,
            MAX_NODES_LIMIT,
            "Node limit per procedure must be reasonable",
        ));
    }
    Ok(())
}

// ============================================================================
// CFG Configuration
// ============================================================================

/// Control flow graph construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CfgConfig {
    /// Build the CFG (default: true)
    pub enabled: bool,

    /// Maximum labeled nodes per procedure (1..=100000)
    pub max_nodes: usize,
}

impl CfgConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        validate_max_nodes("cfg.max_nodes", self.max_nodes)
    }

    /// Builder: Set enabled
    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    /// Builder: Set max_nodes
    pub fn max_nodes(mut self, v: usize) -> Self {
        self.max_nodes = v;
        self
    }

    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            enabled: true,
            max_nodes: 10_000,
        }
    }
}

impl Default for CfgConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ============================================================================
// PDG Configuration
// ============================================================================

/// Program dependence graph construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdgConfig {
    /// Build the PDG (default: true)
    pub enabled: bool,

    /// Maximum labeled nodes per procedure (1..=100000)
    pub max_nodes: usize,

    /// Emit control dependence edges
    pub include_control: bool,

    /// Emit data dependence edges
    pub include_data: bool,

    /// Group nodes by nesting depth in the emitted description
    pub rank_by_depth: bool,
}

impl PdgConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        validate_max_nodes("pdg.max_nodes", self.max_nodes)
    }

    /// Builder: Set enabled
    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    /// Builder: Set max_nodes
    pub fn max_nodes(mut self, v: usize) -> Self {
        self.max_nodes = v;
        self
    }

    /// Builder: Set include_control
    pub fn include_control(mut self, v: bool) -> Self {
        self.include_control = v;
        self
    }

    /// Builder: Set include_data
    pub fn include_data(mut self, v: bool) -> Self {
        self.include_data = v;
        self
    }

    /// Builder: Set rank_by_depth
    pub fn rank_by_depth(mut self, v: bool) -> Self {
        self.rank_by_depth = v;
        self
    }

    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Minimal => Self {
                enabled: false,
                max_nodes: 10_000,
                include_control: true,
                include_data: true,
                rank_by_depth: false,
            },
            Preset::Full => Self {
                enabled: true,
                max_nodes: 10_000,
                include_control: true,
                include_data: true,
                rank_by_depth: true,
            },
        }
    }
}

impl Default for PdgConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ============================================================================
// Emitter Configuration
// ============================================================================

/// How data dependence edges are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataEdgeStyle {
    /// `[style=dashed]`
    Dashed,
    /// Dashed, plus one palette colour per definition node
    ColorPerSource,
}

/// Graph description emitter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub data_edge_style: DataEdgeStyle,
}

impl EmitConfig {
    /// Builder: Set data_edge_style
    pub fn data_edge_style(mut self, v: DataEdgeStyle) -> Self {
        self.data_edge_style = v;
        self
    }

    pub fn from_preset(preset: Preset) -> Self {
        let data_edge_style = match preset {
            Preset::Minimal => DataEdgeStyle::Dashed,
            Preset::Full => DataEdgeStyle::ColorPerSource,
        };
        Self { data_edge_style }
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ============================================================================
// Renderer Configuration
// ============================================================================

/// External Graphviz renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Path to the `dot` executable
    pub dot_path: String,

    /// Output format passed as `-T<format>` (pdf, svg, png, ...)
    pub format: String,
}

impl RenderConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.format.is_empty() || !self.format.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::range_with_hint(
                "render.format",
                &self.format,
                "pdf",
                "svg",
                "Format must be a plain Graphviz output format name",
            ));
        }
        Ok(())
    }

    /// Builder: Set dot_path
    pub fn dot_path(mut self, v: impl Into<String>) -> Self {
        self.dot_path = v.into();
        self
    }

    /// Builder: Set format
    pub fn format(mut self, v: impl Into<String>) -> Self {
        self.format = v.into();
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dot_path: "dot".to_string(),
            format: "pdf".to_string(),
        }
    }
}
