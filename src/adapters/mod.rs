//! Implementations of the [`CommandRunner`](crate::ports::CommandRunner) port.
//!
//! `live` spawns real processes, `recording` captures invocations to a
//! cassette while delegating to another runner, and `replaying` serves a
//! cassette back without spawning anything.

pub mod live;
pub mod recording;
pub mod replaying;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ExitError, Result};

/// Cassette port name for runner interactions.
pub const RUNNER_PORT: &str = "runner";

/// Cassette method name for [`CommandRunner::execute`](crate::ports::CommandRunner::execute).
pub const EXECUTE_METHOD: &str = "execute";

/// Recorded input of one runner invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInput {
    /// Program that was run.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl RunInput {
    /// Captures a program and its arguments.
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self { program: program.to_string(), args: args.iter().map(ToString::to_string).collect() }
    }
}

/// Recorded outcome of one runner invocation.
///
/// Serialized externally tagged, e.g. `{"ok": {"stdout": "..."}}`.
///
/// Captured output is stored as text: bytes that are not valid UTF-8 are
/// replaced with U+FFFD when recorded, so replay returns the lossy text
/// rather than the original bytes. The façade decodes output the same way,
/// so its results are unchanged by a record/replay round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Zero exit status.
    Ok {
        /// Captured standard output.
        stdout: String,
    },
    /// Non-zero exit status.
    Exit {
        /// Exit status.
        status: i32,
        /// Trimmed standard error.
        stderr: String,
        /// Standard output captured before exit.
        #[serde(default)]
        stdout: String,
    },
    /// The program could not be started.
    Launch {
        /// Description of the launch failure.
        message: String,
    },
    /// Any other failure reported by the runner.
    Failed {
        /// Error message.
        message: String,
    },
}

impl RunOutcome {
    /// Rebuilds the runner result this outcome was recorded from.
    ///
    /// # Errors
    ///
    /// Returns the recorded failure as the matching [`Error`] variant.
    pub fn into_result(self, program: &str) -> Result<Vec<u8>> {
        match self {
            Self::Ok { stdout } => Ok(stdout.into_bytes()),
            Self::Exit { status, stderr, stdout } => {
                Err(ExitError::new(program, status, &stderr, stdout.into_bytes()).into())
            }
            Self::Launch { message } => Err(Error::Launch {
                program: program.to_string(),
                source: std::io::Error::other(message),
            }),
            Self::Failed { message } => Err(Error::Cassette(message)),
        }
    }
}

impl From<&Result<Vec<u8>>> for RunOutcome {
    fn from(result: &Result<Vec<u8>>) -> Self {
        match result {
            Ok(stdout) => Self::Ok { stdout: String::from_utf8_lossy(stdout).into_owned() },
            Err(Error::Exit(exit)) => Self::Exit {
                status: exit.status(),
                stderr: exit.stderr().to_string(),
                stdout: String::from_utf8_lossy(exit.stdout()).into_owned(),
            },
            Err(Error::Launch { source, .. }) => Self::Launch { message: source.to_string() },
            Err(other) => Self::Failed { message: other.to_string() },
        }
    }
}
