//! `passvault init` — create the key file and an empty vault.

use std::fs;

use crate::cli::output;
use crate::cli::{load_settings, vault_dir, Cli};
use crate::errors::Result;
use crate::vault::VaultManager;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = vault_dir(cli)?;

    // 1. Create the vault directory if it doesn't exist.
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        output::info(&format!("Created vault directory: {}", dir.display()));
    }

    // 2. Resolve file locations and note whether this is a fresh vault.
    let settings = load_settings(cli)?;
    let config = settings.vault_config(&dir);
    let had_key = config.key_path.exists();

    // 3. Initializing creates the key file when it is missing.
    let vault = VaultManager::new(&config);
    vault.initialize()?;
    let count = vault.len()?;

    if had_key {
        output::info(&format!(
            "Vault already set up at {} ({count} entries)",
            dir.display()
        ));
        return Ok(());
    }

    crate::cli::log_audit(cli, "init", None, Some("key file created"));

    output::success(&format!(
        "Created master key at {}",
        config.key_path.display()
    ));
    output::warning("Anyone who can read the key file can read your vault. Keep it private.");
    output::tip("Run `passvault add <SERVICE> <USERNAME>` to store a credential.");

    Ok(())
}
