//! Runtime settings resolved from the environment and CLI flags.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::vagrant::DEFAULT_BINARY;

/// Working directory containing the Vagrantfile.
pub const ENV_DIR: &str = "VAGRANT_EXEC_DIR";
/// Vagrant executable name or path.
pub const ENV_BINARY: &str = "VAGRANT_EXEC_BINARY";
/// Enables debug logging when truthy.
pub const ENV_DEBUG: &str = "VAGRANT_EXEC_DEBUG";
/// Cassette path to record runner invocations to.
pub const ENV_RECORD: &str = "VAGRANT_EXEC_RECORD";
/// Cassette path to replay runner invocations from.
pub const ENV_REPLAY: &str = "VAGRANT_EXEC_REPLAY";

/// Settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory commands run in; `None` means the current directory.
    pub dir: Option<PathBuf>,
    /// Vagrant executable.
    pub binary: String,
    /// Whether debug logging is enabled.
    pub debug: bool,
    /// Cassette to record to.
    pub record: Option<PathBuf>,
    /// Cassette to replay from.
    pub replay: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dir: None,
            binary: DEFAULT_BINARY.to_string(),
            debug: false,
            record: None,
            replay: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// A `.env` file in the current directory is loaded first when present;
    /// variables already set in the environment take precedence over it.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, treating empty values as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            dir: get(ENV_DIR).map(PathBuf::from),
            binary: get(ENV_BINARY).unwrap_or_else(|| DEFAULT_BINARY.to_string()),
            debug: get(ENV_DEBUG).is_some_and(|value| is_truthy(&value)),
            record: get(ENV_RECORD).map(PathBuf::from),
            replay: get(ENV_REPLAY).map(PathBuf::from),
        }
    }

    /// Checks that the settings are usable together.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if recording and replaying are both
    /// requested or the binary name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.record.is_some() && self.replay.is_some() {
            return Err(Error::Config(format!(
                "{ENV_RECORD} and {ENV_REPLAY} cannot be set at the same time"
            )));
        }
        if self.binary.trim().is_empty() {
            return Err(Error::Config("vagrant binary cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
