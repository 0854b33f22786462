//! `vagrant-exec up`, `halt` and `destroy` commands.

use crate::context::ServiceContext;

/// Execute the `up` command.
///
/// # Errors
///
/// Returns an error string if `vagrant up` fails.
pub fn up(ctx: &ServiceContext) -> Result<(), String> {
    ctx.vagrant.up().map_err(|e| e.to_string())
}

/// Execute the `halt` command.
///
/// # Errors
///
/// Returns an error string if `vagrant halt` fails.
pub fn halt(ctx: &ServiceContext) -> Result<(), String> {
    ctx.vagrant.halt().map_err(|e| e.to_string())
}

/// Execute the `destroy` command.
///
/// # Errors
///
/// Returns an error string if `vagrant destroy` fails.
pub fn destroy(ctx: &ServiceContext) -> Result<(), String> {
    ctx.vagrant.destroy().map_err(|e| e.to_string())
}
