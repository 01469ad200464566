//! Graphviz `dot` adapter

use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::RenderConfig;
use crate::errors::{ProcgraphError, Result};
use crate::features::graph_render::ports::GraphRenderer;

/// Runs `<dot_path> -T<format>` with the document on stdin
#[derive(Debug, Clone, Default)]
pub struct DotCommandRenderer {
    config: RenderConfig,
}

impl DotCommandRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.dot_path);
        cmd.arg(format!("-T{}", self.config.format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl GraphRenderer for DotCommandRenderer {
    fn render(&self, dot: &str) -> Result<Vec<u8>> {
        let mut cmd = self.command();
        tracing::debug!("running renderer: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| {
            ProcgraphError::render(format!("cannot start `{}`: {}", self.config.dot_path, e))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(dot.as_bytes())
                .map_err(|e| ProcgraphError::render(format!("cannot write to renderer: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ProcgraphError::render(format!("renderer did not finish: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProcgraphError::render(format!(
                "`{}` exited with {}: {}",
                self.config.dot_path,
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!("renderer produced {} bytes", output.stdout.len());
        Ok(output.stdout)
    }

    fn format(&self) -> &str {
        &self.config.format
    }
}
