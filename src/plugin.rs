//! Vagrant plugin metadata.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Text vagrant prints in place of a plugin list when none are installed.
pub const NO_PLUGINS_SENTINEL: &str = "No plugins installed";

/// Install location that maps to `vagrant plugin install --local`.
pub const LOCAL_LOCATION: &str = "local";

/// Matches `name (version%!(VAGRANT_COMMA) location)`.
///
/// `%!(VAGRANT_COMMA)` is how vagrant escapes the comma between version and
/// location in machine-readable `ui` messages.
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PLUGIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w-]+)\s\((.*)%!\(VAGRANT_COMMA\)\s([a-z]+)\)$")
        .expect("constant regex pattern is valid")
});

/// Metadata describing a Vagrant plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plugin {
    /// Plugin gem name, or a path to a local gem.
    pub name: String,
    /// Version constraint or installed version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Install location such as `global` or `local`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Plugin {
    /// Creates a plugin with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the install location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Whether the plugin targets the project-local plugin directory.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.location.as_deref() == Some(LOCAL_LOCATION)
    }
}

/// Extracts a plugin from the combined text of a `plugin list` ui message.
///
/// Returns `None` when the text does not describe a plugin.
#[must_use]
pub fn extract_plugin(text: &str) -> Option<Plugin> {
    let caps = PLUGIN_PATTERN.captures(text)?;
    Some(Plugin {
        name: caps[1].to_string(),
        version: Some(caps[2].to_string()),
        location: Some(caps[3].to_string()),
    })
}
