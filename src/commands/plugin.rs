//! `vagrant-exec plugin` commands.

use crate::context::ServiceContext;
use crate::plugin::{Plugin, LOCAL_LOCATION};

/// Execute `plugin list`.
///
/// # Errors
///
/// Returns an error string if the plugin list cannot be read.
pub fn list(ctx: &ServiceContext, json: bool) -> Result<(), String> {
    let plugins = ctx.vagrant.plugin_list().map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&plugins).map_err(|e| e.to_string())?;
        println!("{out}");
    } else if plugins.is_empty() {
        println!("No plugins installed.");
    } else {
        for plugin in &plugins {
            println!("{}", describe(plugin));
        }
    }
    Ok(())
}

/// Execute `plugin install`.
///
/// # Errors
///
/// Returns an error string if the plugin name is empty or installation fails.
pub fn install(
    ctx: &ServiceContext,
    name: &str,
    version: Option<&str>,
    local: bool,
) -> Result<(), String> {
    let plugin = Plugin {
        name: name.to_string(),
        version: version.map(String::from),
        location: local.then(|| LOCAL_LOCATION.to_string()),
    };
    ctx.vagrant.plugin_install(&plugin).map_err(|e| e.to_string())?;
    println!("Installed {}", describe(&plugin));
    Ok(())
}

/// One-line description such as `vagrant-disksize 0.1.3 (global)`.
fn describe(plugin: &Plugin) -> String {
    let mut line = plugin.name.clone();
    if let Some(version) = &plugin.version {
        line.push(' ');
        line.push_str(version);
    }
    if let Some(location) = &plugin.location {
        line.push_str(&format!(" ({location})"));
    }
    line
}
