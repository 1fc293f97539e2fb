//! `passvault reveal` — decrypt one secret for display or copying.

use crate::cli::output;
use crate::cli::{open_vault, resolve_entry, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `reveal` command.
pub fn execute(cli: &Cli, id: &str, copy: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let entry = resolve_entry(&vault, id)?;
    let secret = vault.reveal_secret(&entry)?;

    crate::cli::log_audit(cli, "reveal", Some(&entry.service), copy.then_some("copied"));

    if copy {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PassVaultError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(secret.as_str())
            .map_err(|e| PassVaultError::Clipboard(e.to_string()))?;
        output::success(&format!(
            "Copied password for {}@{} to the clipboard",
            entry.username, entry.service
        ));
    } else {
        println!("{}", secret.as_str());
    }

    Ok(())
}
