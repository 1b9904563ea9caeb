//! Detached, fire-and-forget process launcher.

use std::process::{Command, Stdio};

use tmenu_types::{CommandKind, CommandRunner, CommandSpec, LaunchError};
use tracing::{debug, info, warn};

/// Interpreter used for `python` commands unless configured otherwise.
pub const DEFAULT_PYTHON: &str = "python";

/// Starts command entries as independent child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    python: String,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
        }
    }

    /// Use a different interpreter for `python` commands.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Build the `Command` for a spec without starting it.
    ///
    /// The child gets null stdio so it cannot draw over the menu.
    pub fn build_command(&self, spec: &CommandSpec) -> Result<Command, LaunchError> {
        if spec.payload.trim().is_empty() {
            return Err(LaunchError::EmptyCommand);
        }

        let mut cmd = match spec.kind {
            CommandKind::Shell => shell_command(&spec.payload),
            CommandKind::PythonModule => {
                let mut cmd = Command::new(&self.python);
                cmd.arg("-m").args(spec.payload.split_whitespace());
                cmd
            }
            CommandKind::Program => {
                let mut parts = spec.payload.split_whitespace();
                let program = parts.next().ok_or(LaunchError::EmptyCommand)?;
                let mut cmd = Command::new(program);
                cmd.args(parts);
                cmd
            }
        };

        if let Some(dir) = &spec.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(cmd)
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ProcessRunner {
    fn launch(&self, spec: &CommandSpec) -> Result<(), LaunchError> {
        let mut cmd = self.build_command(spec)?;
        let program = cmd.get_program().to_string_lossy().into_owned();

        let mut child = cmd.spawn().map_err(|source| {
            warn!(kind = %spec.kind, payload = %spec.payload, error = %source, "Failed to launch command");
            LaunchError::Spawn {
                program: program.clone(),
                source,
            }
        })?;

        let pid = child.id();
        info!(kind = %spec.kind, payload = %spec.payload, pid, "Launched command");

        // Reap the child so it does not linger as a zombie. The exit status is
        // only logged; nothing reports it back to the menu.
        std::thread::spawn(move || match child.wait() {
            Ok(status) => debug!(pid, %status, "Command exited"),
            Err(e) => debug!(pid, error = %e, "Failed to wait for command"),
        });

        Ok(())
    }
}

#[cfg(not(windows))]
fn shell_command(payload: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(payload);
    cmd
}

#[cfg(windows)]
fn shell_command(payload: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(payload);
    cmd
}
