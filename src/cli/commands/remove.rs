//! `passvault remove` — delete a credential.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, resolve_entry, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let entry = resolve_entry(&vault, id)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove {}@{}?",
                entry.username, entry.service
            ))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.remove_entry(entry.id)?;

    crate::cli::log_audit(cli, "remove", Some(&entry.service), None);
    output::success(&format!(
        "Removed {}@{} ({} left)",
        entry.username,
        entry.service,
        vault.len()?
    ));

    Ok(())
}
