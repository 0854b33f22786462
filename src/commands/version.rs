//! `vagrant-exec version` command.

use crate::context::ServiceContext;

/// Execute the `version` command, printing the installed vagrant version.
///
/// # Errors
///
/// Returns an error string if the version cannot be determined.
pub fn run(ctx: &ServiceContext) -> Result<(), String> {
    let version = ctx.vagrant.version().map_err(|e| e.to_string())?;
    println!("{version}");
    Ok(())
}
