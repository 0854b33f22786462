//! Machine states and the `--machine-readable` output format.
//!
//! Vagrant's machine-readable output is one event per line:
//! `timestamp,target,type,data...`. The target is empty for global events.
//! Fields are split on literal commas; vagrant itself escapes commas inside
//! data as `%!(VAGRANT_COMMA)`, so no quoting is needed here.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Minimum number of comma-separated fields in a well-formed line.
const MIN_FIELDS: usize = 3;

/// State of a machine managed by Vagrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MachineState {
    /// Any state this crate does not recognize.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    /// The VM was stopped abruptly without closing the session.
    #[serde(rename = "aborted")]
    Aborted,
    /// An internal VirtualBox error made the VM fail.
    #[serde(rename = "gurumeditation")]
    GuruMeditation,
    /// VirtualBox cannot find the VM configuration.
    #[serde(rename = "inaccessible")]
    Inaccessible,
    /// The VM has not been created.
    #[serde(rename = "not_created")]
    NotCreated,
    /// The VM was paused.
    #[serde(rename = "paused")]
    Paused,
    /// The VM is turned off.
    #[serde(rename = "poweroff")]
    PowerOff,
    /// The VM is stopping.
    #[serde(rename = "stopping")]
    Stopping,
    /// The VM is up and running.
    #[serde(rename = "running")]
    Running,
    /// The VM is saving its state.
    #[serde(rename = "saving")]
    Saving,
    /// The VM is suspended.
    #[serde(rename = "saved")]
    Saved,
    /// VirtualBox cannot recover the current VM state.
    #[serde(rename = "stuck")]
    Stuck,
}

impl MachineState {
    /// Every state, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Unknown,
        Self::Aborted,
        Self::GuruMeditation,
        Self::Inaccessible,
        Self::NotCreated,
        Self::Paused,
        Self::PowerOff,
        Self::Stopping,
        Self::Running,
        Self::Saving,
        Self::Saved,
        Self::Stuck,
    ];

    /// Maps a vagrant state token such as `not_created` to a state.
    ///
    /// Unrecognized tokens map to [`MachineState::Unknown`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "running" => Self::Running,
            "not_created" => Self::NotCreated,
            "saved" => Self::Saved,
            "poweroff" => Self::PowerOff,
            "aborted" => Self::Aborted,
            "paused" => Self::Paused,
            "stopping" => Self::Stopping,
            "saving" => Self::Saving,
            "stuck" => Self::Stuck,
            "inaccessible" => Self::Inaccessible,
            "gurumeditation" => Self::GuruMeditation,
            _ => Self::Unknown,
        }
    }

    /// The vagrant token for this state.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Aborted => "aborted",
            Self::GuruMeditation => "gurumeditation",
            Self::Inaccessible => "inaccessible",
            Self::NotCreated => "not_created",
            Self::Paused => "paused",
            Self::PowerOff => "poweroff",
            Self::Stopping => "stopping",
            Self::Running => "running",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::Stuck => "stuck",
        }
    }

    /// Canonical display name, e.g. `NotCreated`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Aborted => "Aborted",
            Self::GuruMeditation => "GuruMeditation",
            Self::Inaccessible => "Inaccessible",
            Self::NotCreated => "NotCreated",
            Self::Paused => "Paused",
            Self::PowerOff => "PowerOff",
            Self::Stopping => "Stopping",
            Self::Running => "Running",
            Self::Saving => "Saving",
            Self::Saved => "Saved",
            Self::Stuck => "Stuck",
        }
    }

    /// Whether the machine is running.
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

impl From<&str> for MachineState {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status of a single machine Vagrant is managing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MachineStatus {
    /// Machine name from the Vagrantfile.
    pub name: String,
    /// Provider backing the machine, e.g. `virtualbox`.
    pub provider: String,
    /// Current machine state.
    pub state: MachineState,
}

/// One line of machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    /// Unix timestamp as printed by vagrant.
    pub timestamp: String,
    /// Machine the event pertains to; empty for global events.
    pub target: String,
    /// Message type, e.g. `state` or `version-installed`.
    pub kind: String,
    /// Remaining fields, possibly none.
    pub data: Vec<String>,
}

impl OutputEntry {
    /// First data field, if any.
    #[must_use]
    pub fn first_data(&self) -> Option<&str> {
        self.data.first().map(String::as_str)
    }
}

/// Parses machine-readable output into entries, in input order.
///
/// # Errors
///
/// Returns [`Error::Parse`] if any line has fewer than three fields. No
/// partial result is returned.
pub fn parse_machine_readable(output: &str) -> Result<Vec<OutputEntry>> {
    output
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let mut fields = line.split(',');
            let (Some(timestamp), Some(target), Some(kind)) =
                (fields.next(), fields.next(), fields.next())
            else {
                let count = line.split(',').count();
                return Err(Error::Parse(format!(
                    "line {} has {count} field(s), expected at least {MIN_FIELDS}",
                    idx + 1
                )));
            };
            Ok(OutputEntry {
                timestamp: timestamp.to_string(),
                target: target.to_string(),
                kind: kind.to_string(),
                data: fields.map(String::from).collect(),
            })
        })
        .collect()
}

/// Returns the data of the first entry whose type is `kind`.
///
/// # Errors
///
/// Returns [`Error::MissingEntry`] if no entry has that type.
pub fn pluck_entry_data<'a>(entries: &'a [OutputEntry], kind: &str) -> Result<&'a [String]> {
    entries
        .iter()
        .find(|entry| entry.kind == kind)
        .map(|entry| entry.data.as_slice())
        .ok_or_else(|| Error::MissingEntry(kind.to_string()))
}
