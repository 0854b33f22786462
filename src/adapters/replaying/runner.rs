//! Replaying adapter for the `CommandRunner` port.

use std::sync::{Mutex, PoisonError};

use crate::adapters::{RunInput, RunOutcome, EXECUTE_METHOD, RUNNER_PORT};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::{Error, Result};
use crate::ports::CommandRunner;

/// Serves recorded runner results from a cassette, in recording order.
///
/// Each call must pass the same arguments as the recorded invocation; the
/// program name is taken from the caller so a cassette recorded against one
/// vagrant path replays against another.
pub struct ReplayingCommandRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCommandRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl CommandRunner for ReplayingCommandRunner {
    fn execute(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        let interaction = {
            let mut replayer = self.replayer.lock().unwrap_or_else(PoisonError::into_inner);
            replayer.next_interaction(RUNNER_PORT, EXECUTE_METHOD)?.clone()
        };

        let recorded: RunInput = serde_json::from_value(interaction.input).map_err(|e| {
            Error::Cassette(format!("interaction seq={} has invalid input: {e}", interaction.seq))
        })?;
        if recorded.args != args {
            return Err(Error::Cassette(format!(
                "interaction seq={} was recorded for args {:?}, got {:?}",
                interaction.seq, recorded.args, args
            )));
        }

        let outcome: RunOutcome = serde_json::from_value(interaction.output).map_err(|e| {
            Error::Cassette(format!("interaction seq={} has invalid output: {e}", interaction.seq))
        })?;
        outcome.into_result(program)
    }
}
