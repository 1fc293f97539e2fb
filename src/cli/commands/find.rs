//! `passvault find` — search credentials.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `find` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    let vault = open_vault(cli)?;
    let entries = vault.find_entries(query)?;

    output::info(&format!("{} match(es) for '{query}'", entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
