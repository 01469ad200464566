//! Top-level analysis configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, ConfigOverrides, SUPPORTED_VERSIONS};
use super::preset::Preset;
use super::stage_configs::{CfgConfig, EmitConfig, PdgConfig, RenderConfig};

/// Complete configuration for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub preset: Preset,
    pub cfg: CfgConfig,
    pub pdg: PdgConfig,
    pub emit: EmitConfig,
    pub render: RenderConfig,
    /// Analyse independent procedures on the rayon pool
    pub parallel: bool,
}

impl AnalysisConfig {
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            cfg: CfgConfig::from_preset(preset),
            pdg: PdgConfig::from_preset(preset),
            emit: EmitConfig::from_preset(preset),
            render: RenderConfig::default(),
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Override the CFG stage
    pub fn cfg(mut self, f: impl FnOnce(CfgConfig) -> CfgConfig) -> Self {
        self.cfg = f(self.cfg);
        self
    }

    /// Override the PDG stage
    pub fn pdg(mut self, f: impl FnOnce(PdgConfig) -> PdgConfig) -> Self {
        self.pdg = f(self.pdg);
        self
    }

    /// Override the emitter
    pub fn emit(mut self, f: impl FnOnce(EmitConfig) -> EmitConfig) -> Self {
        self.emit = f(self.emit);
        self
    }

    /// Override the renderer
    pub fn render(mut self, f: impl FnOnce(RenderConfig) -> RenderConfig) -> Self {
        self.render = f(self.render);
        self
    }

    pub fn parallel(mut self, v: bool) -> Self {
        self.parallel = v;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.cfg.validate()?;
        self.pdg.validate()?;
        self.render.validate()?;
        if !self.cfg.enabled && !self.pdg.enabled {
            return Err(ConfigError::NothingEnabled(
                "enable at least one of cfg / pdg".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from a YAML document (schema v1)
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match file.preset.as_deref() {
            Some(name) => Preset::parse(name)?,
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(parallel) = file.parallel {
            config.parallel = parallel;
        }
        if let Some(overrides) = file.overrides {
            if let Some(cfg) = overrides.cfg {
                config.cfg = cfg;
            }
            if let Some(pdg) = overrides.pdg {
                config.pdg = pdg;
            }
            if let Some(emit) = overrides.emit {
                config.emit = emit;
            }
            if let Some(render) = overrides.render {
                config.render = render;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file (schema v1)
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export as YAML (schema v1, every stage spelled out)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigFileV1 {
            version: Some(1),
            preset: Some(self.preset.as_str().to_string()),
            parallel: Some(self.parallel),
            overrides: Some(ConfigOverrides {
                cfg: Some(self.cfg.clone()),
                pdg: Some(self.pdg.clone()),
                emit: Some(self.emit.clone()),
                render: Some(self.render.clone()),
            }),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}
