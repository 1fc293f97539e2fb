//! `passvault categories` — list categories in use.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `categories` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    let categories = vault.get_all_categories()?;

    if categories.is_empty() {
        output::info("No categories yet.");
        return Ok(());
    }

    for name in &categories {
        let count = vault.entries_in_category(name)?.len();
        println!("{name} ({count})");
    }

    Ok(())
}
