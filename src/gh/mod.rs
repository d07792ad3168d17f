//! Everything that talks to the GitHub CLI.
//!
//! All process spawning goes through the [`CommandRunner`] trait so the
//! rest of the crate never touches `std::process` directly.

pub mod access;
pub mod secrets;

#[cfg(test)]
pub(crate) mod fake;

use std::io::Write;
use std::process::{Command, Stdio};

use crate::errors::{ClaspSecretsError, Result};

pub use access::{
    check_access, require_access, validate_access, AccessErrorReason, RepositoryAccess,
};
pub use secrets::{delete_secret, list_secret_names, set_secret, RepoFlag};

/// What to do with the child's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect both streams into the returned [`CommandOutput`].
    Capture,
    /// Let both streams pass straight through to the user's terminal.
    Inherit,
}

/// Result of one finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable reason for a failed run: stderr if there is any,
    /// otherwise the exit status.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs the secret-store CLI with the given arguments.
pub trait CommandRunner {
    /// Run to completion, feeding `stdin` to the child if given.
    ///
    /// Only a failure to launch or talk to the process is an `Err`; a
    /// non-zero exit is reported through [`CommandOutput::exit_code`].
    fn run(&self, args: &[&str], stdin: Option<&str>, mode: OutputMode) -> Result<CommandOutput>;
}

/// [`CommandRunner`] that spawns a real binary (`gh` by default).
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: String,
}

impl SystemRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new("gh")
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, args: &[&str], stdin: Option<&str>, mode: OutputMode) -> Result<CommandOutput> {
        tracing::debug!(
            program = %self.program,
            ?args,
            stdin_bytes = stdin.map(str::len),
            ?mode,
            "running external command"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        match mode {
            OutputMode::Capture => {
                cmd.stdout(Stdio::piped());
                cmd.stderr(Stdio::piped());
            }
            OutputMode::Inherit => {
                cmd.stdout(Stdio::inherit());
                cmd.stderr(Stdio::inherit());
            }
        }

        let mut child = cmd.spawn().map_err(|e| {
            ClaspSecretsError::ExternalCommandFailure(format!(
                "failed to run `{}`: {e}",
                self.program
            ))
        })?;

        // Dropping the handle closes the pipe so the child sees EOF.
        if let (Some(payload), Some(mut pipe)) = (stdin, child.stdin.take()) {
            if let Err(e) = pipe.write_all(payload.as_bytes()) {
                drop(pipe);
                let status = child.wait();
                tracing::debug!(?status, error = %e, "stdin write failed; child reaped");
                return Err(ClaspSecretsError::ExternalCommandFailure(format!(
                    "failed to write to `{}` stdin: {e}",
                    self.program
                )));
            }
        }

        let output = child.wait_with_output()?;
        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        tracing::debug!(exit_code = ?result.exit_code, "external command finished");
        Ok(result)
    }
}
