//! Recording session owning the cassette recorder.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use super::recorder::CassetteRecorder;

/// Owns the shared recorder for one recording session.
///
/// Recording adapters hold clones of [`RecordingSession::recorder`]; they must
/// be dropped before [`RecordingSession::finish`] writes the cassette.
pub struct RecordingSession {
    /// Recorder shared with the recording adapters.
    pub recorder: Arc<Mutex<CassetteRecorder>>,
    path: PathBuf,
}

impl RecordingSession {
    /// Starts a session that will write its cassette to `path`.
    ///
    /// The cassette is named after the start time and tagged with a fresh
    /// session id.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("vagrant-exec-{}", Utc::now().format("%Y-%m-%dT%H-%M-%S"));
        let session = Uuid::new_v4().to_string();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, name, session)));
        Self { recorder, path }
    }

    /// Path the cassette will be written to.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Finish the recorder and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}
