use super::{NodeSource, parse::parse_nodes};
use crate::errors::{AppError, AppResult};
use crate::models::node::NodeReport;
use std::io;
use std::process::Command;

/// Shells out to the radio's command-line tool on every poll.
///
/// The invocation blocks until the tool exits; any timeout is the tool's own.
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    port: Option<String>,
}

impl CommandSource {
    pub fn new(program: &str, args: &[String], port: Option<String>) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
            port,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(port) = &self.port {
            cmd.arg("--port").arg(port);
        }
        cmd
    }

    /// Human-readable command line, for the startup banner.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        if let Some(port) = &self.port {
            parts.push("--port".into());
            parts.push(port.clone());
        }
        parts.join(" ")
    }
}

impl NodeSource for CommandSource {
    fn poll(&mut self) -> AppResult<Option<Vec<NodeReport>>> {
        let output = match self.command().output() {
            Ok(out) => out,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AppError::CommandNotFound(self.program.clone()));
            }
            Err(e) => {
                log::warn!("Failed to run '{}': {e}", self.program);
                return Ok(None);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let nodes = parse_nodes(&stdout);
        if nodes.is_none() {
            log::debug!("Unparsable node-query output ({} bytes)", stdout.len());
        }

        Ok(nodes)
    }
}
