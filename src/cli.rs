//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `vagrant-exec`.
#[derive(Debug, Parser)]
#[command(name = "vagrant-exec", version, about = "Manage Vagrant machines through typed commands")]
pub struct Cli {
    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Directory containing the Vagrantfile.
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,
    /// Vagrant executable to invoke.
    #[arg(long, global = true, value_name = "BIN")]
    pub binary: Option<String>,
    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create and configure the guest machines.
    Up,
    /// Shut down the guest machines.
    Halt,
    /// Destroy the guest machines and their resources.
    Destroy,
    /// Show the state of every machine.
    Status {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show the installed vagrant version.
    Version,
    /// Run a command on a machine over SSH.
    Ssh {
        /// Machine to connect to; optional with a single machine.
        #[arg(long, short)]
        machine: Option<String>,
        /// Command to run on the machine.
        command: String,
    },
    /// Manage vagrant plugins.
    #[command(subcommand)]
    Plugin(PluginCommand),
}

/// Plugin subcommands.
#[derive(Debug, Subcommand)]
pub enum PluginCommand {
    /// List installed plugins.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Install a plugin.
    Install {
        /// Plugin name or path to a local gem.
        name: String,
        /// Version constraint to install.
        #[arg(long, value_name = "VERSION")]
        plugin_version: Option<String>,
        /// Install into the project-local plugin directory.
        #[arg(long)]
        local: bool,
    },
}
