//! Where usage snapshots come from.

use routeplan_error::{JsonError, JsonErrorKind, RouteplanResult, UpstreamError, UpstreamErrorKind};
use routeplan_limits::StatusCommandConfig;
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

/// Produces the raw text of a usage snapshot.
pub trait StatusSource {
    /// Fetch one snapshot. Blocks until it is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be obtained.
    fn fetch(&self) -> RouteplanResult<String>;
}

/// Runs an external command and returns its stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStatusSource {
    program: String,
    args: Vec<String>,
}

impl CommandStatusSource {
    /// Command from a program and its arguments.
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Command described by configuration.
    pub fn from_config(config: &StatusCommandConfig) -> Self {
        Self::new(config.program.clone(), config.args.iter().cloned())
    }
}

impl StatusSource for CommandStatusSource {
    /// Run the command to completion.
    ///
    /// A non-zero exit fails with the command's trimmed stderr, or
    /// `"<program> status failed"` when stderr is empty.
    #[instrument(skip(self), fields(program = %self.program, args = ?self.args))]
    fn fetch(&self) -> RouteplanResult<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                UpstreamError::new(UpstreamErrorKind::Spawn {
                    program: self.program.clone(),
                    reason: e.to_string(),
                })
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} status failed", self.program)
            } else {
                stderr
            };
            return Err(UpstreamError::new(UpstreamErrorKind::NonZeroExit {
                status: output.status.code(),
                message,
            })
            .into());
        }

        debug!(bytes = output.stdout.len(), "Usage command succeeded");

        String::from_utf8(output.stdout).map_err(|e| {
            JsonError::new(JsonErrorKind::Encoding {
                valid_up_to: e.utf8_error().valid_up_to(),
            })
            .into()
        })
    }
}
