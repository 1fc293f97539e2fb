//! `passvault list` — display credentials in a table.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, favorites: bool, category: Option<&str>) -> Result<()> {
    let vault = open_vault(cli)?;

    let mut entries = match category {
        Some(name) => vault.entries_in_category(name)?,
        None => vault.list_all()?,
    };
    if favorites {
        entries.retain(|e| e.is_favorite);
    }

    output::info(&format!("{} entries", entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
