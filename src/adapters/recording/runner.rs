//! Recording adapter for the `CommandRunner` port.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::adapters::{RunInput, RunOutcome, EXECUTE_METHOD, RUNNER_PORT};
use crate::cassette::recorder::CassetteRecorder;
use crate::error::Result;
use crate::ports::CommandRunner;

/// Records runner invocations while delegating to an inner implementation.
pub struct RecordingCommandRunner {
    inner: Box<dyn CommandRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCommandRunner {
    /// Creates a new recording runner wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn CommandRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn execute(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        let result = self.inner.execute(program, args);
        let input = RunInput::new(program, args);
        let outcome = RunOutcome::from(&result);
        if let Err(err) =
            record_interaction(&self.recorder, RUNNER_PORT, EXECUTE_METHOD, &input, &outcome)
        {
            tracing::warn!(%err, program, "Failed to record command");
        }
        result
    }
}
