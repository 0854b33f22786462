//! Live command runner using `std::process::Command`.

use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::error::{Error, ExitError, Result};
use crate::ports::runner::CommandRunner;

/// Runs programs as child processes in an optional working directory.
#[derive(Debug, Clone, Default)]
pub struct LiveCommandRunner {
    dir: Option<PathBuf>,
}

impl LiveCommandRunner {
    /// Creates a runner that executes in the current process directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner that executes inside `dir`.
    ///
    /// An empty path falls back to the current process directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self { dir: (!dir.as_os_str().is_empty()).then_some(dir) }
    }

    /// Working directory commands run in, if one was configured.
    #[must_use]
    pub fn dir(&self) -> Option<&PathBuf> {
        self.dir.as_ref()
    }
}

impl CommandRunner for LiveCommandRunner {
    fn execute(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|source| Error::Launch { program: program.to_string(), source })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ExitError::new(program, exit_code(output.status), &stderr, output.stdout).into())
    }
}

/// Exit code of a finished process; signal deaths map to `128 + signal`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
