//! Command runner port for invoking external programs.

use crate::error::Result;

/// Executes an external program and captures its standard output.
///
/// Abstracting process execution lets the façade run against recorded
/// cassettes or test doubles without spawning real processes.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and waits for it to exit.
    ///
    /// Returns the captured standard output on a zero exit status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exit`](crate::Error::Exit) when the program exits
    /// non-zero, carrying its trimmed standard error and any captured
    /// standard output. Returns [`Error::Launch`](crate::Error::Launch) when
    /// the program cannot be started.
    fn execute(&self, program: &str, args: &[&str]) -> Result<Vec<u8>>;
}
