//! `passvault rotate-key` — replace the master key.
//!
//! Generates a new key, re-encrypts every secret under it, and commits
//! the key file and vault file together.  If any secret cannot be
//! decrypted nothing on disk changes.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `rotate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    let count = vault.len()?;

    vault.change_master_key()?;

    crate::cli::log_audit(
        cli,
        "rotate-key",
        None,
        Some(&format!("{count} entries re-encrypted")),
    );

    output::success(&format!("Master key rotated ({count} entries re-encrypted)"));
    output::tip("Back up the new key file; the old one no longer opens this vault.");

    Ok(())
}
