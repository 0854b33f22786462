//! Recording adapters that capture interactions to cassettes.

pub mod runner;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use runner::RecordingCommandRunner;

/// Record an interaction, serializing its input and output as JSON.
///
/// # Errors
///
/// Returns an error if either value cannot be serialized.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) -> Result<(), serde_json::Error>
where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input)?;
    let output_json = serde_json::to_value(output)?;

    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, input_json, output_json);
    Ok(())
}
