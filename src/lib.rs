//! Typed wrapper around the `vagrant` command-line tool.
//!
//! [`Vagrant`] runs vagrant subcommands through a [`CommandRunner`] and
//! decodes their `--machine-readable` output into [`MachineStatus`],
//! [`Plugin`] and version values.
//!
//! ```no_run
//! use vagrant_exec::Vagrant;
//!
//! # fn example() -> vagrant_exec::Result<()> {
//! let vagrant = Vagrant::at("/path/to/project");
//! vagrant.up()?;
//! for machine in vagrant.status()? {
//!     println!("{} is {}", machine.name, machine.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod machine;
pub mod plugin;
pub mod ports;
pub mod vagrant;

pub use error::{Error, ExitError, Result};
pub use machine::{MachineState, MachineStatus};
pub use plugin::Plugin;
pub use ports::CommandRunner;
pub use vagrant::Vagrant;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
/// Help and version requests print to stdout and succeed.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
