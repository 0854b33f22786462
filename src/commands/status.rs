//! `vagrant-exec status` command.

use crate::context::ServiceContext;
use crate::machine::MachineStatus;

/// Execute the `status` command.
///
/// Prints a table of machines showing name, provider and state, or the
/// statuses as JSON when `json` is set.
///
/// # Errors
///
/// Returns an error string if the status cannot be read.
pub fn run(ctx: &ServiceContext, json: bool) -> Result<(), String> {
    let statuses = ctx.vagrant.status().map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&statuses).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    if statuses.is_empty() {
        println!("No machines found.");
        return Ok(());
    }
    print!("{}", render_table(&statuses));
    Ok(())
}

/// Renders statuses as an aligned NAME/PROVIDER/STATE table.
#[must_use]
pub fn render_table(statuses: &[MachineStatus]) -> String {
    let rows: Vec<(&str, &str, String)> = statuses
        .iter()
        .map(|s| (s.name.as_str(), s.provider.as_str(), s.state.to_string()))
        .collect();

    // Calculate column widths.
    let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(4).max(4);
    let provider_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(8).max(8);

    let mut out = format!("{:<name_width$}  {:<provider_width$}  STATE\n", "NAME", "PROVIDER");
    out.push_str(&format!("{:-<name_width$}  {:-<provider_width$}  -----\n", "", ""));
    for (name, provider, state) in &rows {
        out.push_str(&format!("{name:<name_width$}  {provider:<provider_width$}  {state}\n"));
    }
    out
}
