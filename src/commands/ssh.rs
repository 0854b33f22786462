//! `vagrant-exec ssh` command.

use crate::context::ServiceContext;

/// Execute the `ssh` command, printing the remote command's output verbatim.
///
/// # Errors
///
/// Returns an error string if the SSH invocation fails.
pub fn run(ctx: &ServiceContext, machine: Option<&str>, command: &str) -> Result<(), String> {
    let output = ctx.vagrant.ssh(machine, command).map_err(|e| e.to_string())?;
    print!("{output}");
    Ok(())
}
