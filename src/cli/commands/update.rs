//! `passvault favorite|category|notes` — edit entry metadata.

use crate::cli::output;
use crate::cli::{open_vault, resolve_entry, Cli};
use crate::errors::Result;

/// Execute the `favorite` command.
pub fn favorite(cli: &Cli, id: &str) -> Result<()> {
    let vault = open_vault(cli)?;
    let entry = resolve_entry(&vault, id)?;
    vault.toggle_favorite(entry.id)?;

    let now_favorite = !entry.is_favorite;
    crate::cli::log_audit(
        cli,
        "favorite",
        Some(&entry.service),
        Some(if now_favorite { "on" } else { "off" }),
    );

    if now_favorite {
        output::success(&format!("Marked {} as favorite", entry.service));
    } else {
        output::success(&format!("Removed {} from favorites", entry.service));
    }
    Ok(())
}

/// Execute the `category` command.
pub fn category(cli: &Cli, id: &str, name: &str) -> Result<()> {
    let vault = open_vault(cli)?;
    let entry = resolve_entry(&vault, id)?;
    vault.update_category(entry.id, name)?;

    crate::cli::log_audit(cli, "category", Some(&entry.service), Some(name));
    output::success(&format!(
        "Moved {} from '{}' to '{name}'",
        entry.service, entry.category
    ));
    Ok(())
}

/// Execute the `notes` command.
pub fn notes(cli: &Cli, id: &str, text: &str) -> Result<()> {
    let vault = open_vault(cli)?;
    let entry = resolve_entry(&vault, id)?;
    vault.update_notes(entry.id, text)?;

    crate::cli::log_audit(cli, "notes", Some(&entry.service), None);
    if text.is_empty() {
        output::success(&format!("Cleared notes for {}", entry.service));
    } else {
        output::success(&format!("Updated notes for {}", entry.service));
    }
    Ok(())
}
