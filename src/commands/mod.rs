//! Command dispatch and handlers.

pub mod lifecycle;
pub mod plugin;
pub mod ssh;
pub mod status;
pub mod version;

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command, GlobalArgs, PluginCommand};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::logging;

/// Dispatch a parsed command line to its handler.
///
/// Settings come from the environment (see [`crate::config`]) with CLI flags
/// taking precedence. When `VAGRANT_EXEC_RECORD` is set, every vagrant
/// invocation is recorded to that cassette file.
///
/// # Errors
///
/// Returns an error string if the settings are invalid or the command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = resolve_settings(Settings::from_env(), &cli.global);
    logging::init(settings.debug);

    let (ctx, session) = ServiceContext::from_settings(&settings)?;

    let result = dispatch_with_context(&cli.command, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        let finished = finish_recording(session);
        return merge_recording_result(result, finished);
    }

    result
}

/// Combines the command result with the outcome of writing its cassette.
///
/// A command failure wins; a cassette failure alongside it is only logged.
fn merge_recording_result(
    result: Result<(), String>,
    finished: Result<(), String>,
) -> Result<(), String> {
    match (result, finished) {
        (Err(err), Err(record_err)) => {
            tracing::warn!(error = %record_err, "Recording not saved");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), finished) => finished,
    }
}

/// Applies CLI flags over environment settings.
#[must_use]
pub fn resolve_settings(mut settings: Settings, global: &GlobalArgs) -> Settings {
    if let Some(dir) = &global.dir {
        settings.dir = Some(dir.clone());
    }
    if let Some(binary) = &global.binary {
        settings.binary.clone_from(binary);
    }
    settings.debug |= global.debug;
    settings
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Up => lifecycle::up(ctx),
        Command::Halt => lifecycle::halt(ctx),
        Command::Destroy => lifecycle::destroy(ctx),
        Command::Status { json } => status::run(ctx, *json),
        Command::Version => version::run(ctx),
        Command::Ssh { machine, command } => ssh::run(ctx, machine.as_deref(), command),
        Command::Plugin(PluginCommand::List { json }) => plugin::list(ctx, *json),
        Command::Plugin(PluginCommand::Install { name, plugin_version, local }) => {
            plugin::install(ctx, name, plugin_version.as_deref(), *local)
        }
    }
}

/// Finish a recording session and report where the cassette went.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let path = session.finish()?;
    tracing::info!(path = %path.display(), "Recording saved");
    Ok(())
}
