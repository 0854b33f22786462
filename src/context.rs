//! Service context wiring a runner implementation into the façade.

use std::path::Path;

use crate::adapters::live::LiveCommandRunner;
use crate::adapters::recording::RecordingCommandRunner;
use crate::adapters::replaying::ReplayingCommandRunner;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::CommandRunner;
use crate::vagrant::Vagrant;

/// Bundles the façade with the runner adapter chosen for this invocation.
///
/// Constructors wire up different runner implementations (live, recording,
/// replaying).
pub struct ServiceContext {
    /// Façade issuing vagrant commands.
    pub vagrant: Vagrant,
}

impl ServiceContext {
    /// Creates a live context that spawns the real vagrant binary.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self::with_runner(settings, Box::new(live_runner(settings)))
    }

    /// Creates a context that records every invocation to a cassette at `path`.
    ///
    /// Uses the live runner for actual work. The returned session must be
    /// finished after this context is dropped.
    #[must_use]
    pub fn recording_at(settings: &Settings, path: &Path) -> (Self, RecordingSession) {
        let session = RecordingSession::new(path);
        let runner = RecordingCommandRunner::new(
            Box::new(live_runner(settings)),
            std::sync::Arc::clone(&session.recorder),
        );
        (Self::with_runner(settings, Box::new(runner)), session)
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(settings: &Settings, path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let runner = ReplayingCommandRunner::new(CassetteReplayer::new(&cassette));
        Ok(Self::with_runner(settings, Box::new(runner)))
    }

    /// Builds the context described by `settings`.
    ///
    /// Returns the recording session alongside the context when recording.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or a replay cassette
    /// cannot be loaded.
    pub fn from_settings(
        settings: &Settings,
    ) -> Result<(Self, Option<RecordingSession>), String> {
        settings.validate().map_err(|e| e.to_string())?;

        if let Some(path) = &settings.replay {
            return Ok((Self::replaying(settings, path)?, None));
        }
        if let Some(path) = &settings.record {
            let (ctx, session) = Self::recording_at(settings, path);
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(settings), None))
    }

    fn with_runner(settings: &Settings, runner: Box<dyn CommandRunner>) -> Self {
        Self { vagrant: Vagrant::new(runner).with_executable(settings.binary.clone()) }
    }
}

fn live_runner(settings: &Settings) -> LiveCommandRunner {
    settings.dir.as_ref().map_or_else(LiveCommandRunner::new, LiveCommandRunner::in_dir)
}
