//! `passvault add` — store a new credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, open_vault, Cli};
use crate::crypto::{generate_password, password_strength};
use crate::errors::{PassVaultError, Result};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    username: &str,
    category: Option<&str>,
    notes: Option<&str>,
    generate: bool,
) -> Result<()> {
    let vault = open_vault(cli)?;

    // Determine the secret from one of three sources.
    let secret = if generate {
        // Source 1: Generated with the configured options.
        let settings = load_settings(cli)?;
        generate_password(&settings.generator_options())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string())
    } else {
        // Source 3: Interactive secure prompt (default).
        let pw = dialoguer::Password::new()
            .with_prompt(format!("Password for {username}@{service}"))
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
        Zeroizing::new(pw)
    };

    let entry = vault.add_entry(service, username, &secret, category, notes)?;

    crate::cli::log_audit(
        cli,
        "add",
        Some(&entry.service),
        Some(&format!("category {}", entry.category)),
    );

    output::success(&format!(
        "Added {} for {} [{}] ({} total)",
        entry.username,
        entry.service,
        output::short_id(&entry),
        vault.len()?
    ));
    if generate {
        output::info(&format!(
            "Generated a {}-character password ({}).",
            secret.chars().count(),
            output::strength_label(password_strength(&secret))
        ));
        output::tip(&format!(
            "Run `passvault reveal {} --copy` to copy it.",
            output::short_id(&entry)
        ));
    }

    Ok(())
}
