//! Error types shared by the runner, the parser, and the façade.

use thiserror::Error;

/// Result type alias for `vagrant-exec` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the runner and the [`Vagrant`](crate::Vagrant) façade.
#[derive(Debug, Error)]
pub enum Error {
    /// The external program could not be started at all.
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// Program that was being launched.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The external program ran and exited with a non-zero status.
    #[error(transparent)]
    Exit(#[from] ExitError),

    /// Captured output does not match the machine-readable format.
    #[error("invalid format: {0}")]
    Parse(String),

    /// No entry of the requested message type was present.
    #[error("cannot pluck data for message type: {0}")]
    MissingEntry(String),

    /// Caller-supplied input violates a precondition.
    #[error("{0}")]
    Validation(String),

    /// Recording or replaying a cassette failed.
    #[error("cassette error: {0}")]
    Cassette(String),

    /// Configuration values are inconsistent or unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the structured exit error when this is a non-zero exit.
    #[must_use]
    pub fn as_exit(&self) -> Option<&ExitError> {
        match self {
            Self::Exit(exit) => Some(exit),
            _ => None,
        }
    }
}

/// A command exited with a non-zero status.
///
/// Holds the program name, the exit status and the trimmed standard error.
/// Standard output captured before the failure is kept as well.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{program} exited with status {status}: {stderr}")]
pub struct ExitError {
    program: String,
    status: i32,
    stderr: String,
    stdout: Vec<u8>,
}

impl ExitError {
    /// Creates an exit error, trimming surrounding whitespace from `stderr`.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        status: i32,
        stderr: &str,
        stdout: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            program: program.into(),
            status,
            stderr: stderr.trim().to_string(),
            stdout: stdout.into(),
        }
    }

    /// Name of the program that failed.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Exit status of the process.
    #[must_use]
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Trimmed standard error of the process.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Standard output captured before the process exited.
    #[must_use]
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }
}
