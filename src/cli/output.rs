//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Entry;

/// Number of id characters shown in tables; enough to be a unique prefix
/// in any realistic vault.
const SHORT_ID_LEN: usize = 8;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// The id prefix shown to users.
pub fn short_id(entry: &Entry) -> String {
    entry.id.to_string().chars().take(SHORT_ID_LEN).collect()
}

/// Print a table of entries (ID, Service, Username, Category, Fav, Created).
/// Secrets are never shown here.
pub fn print_entries_table(entries: &[Entry]) {
    if entries.is_empty() {
        info("No matching entries.");
        tip("Run `passvault add <SERVICE> <USERNAME>` to store a credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Service", "Username", "Category", "Fav", "Created"]);

    for e in entries {
        table.add_row(vec![
            short_id(e),
            e.service.clone(),
            e.username.clone(),
            e.category.clone(),
            if e.is_favorite { "\u{2605}" } else { "" }.to_string(),
            e.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
}

/// Describe a 0–100 strength score in words.
pub fn strength_label(score: u8) -> String {
    match score {
        0..=39 => style("weak").red().to_string(),
        40..=69 => style("fair").yellow().to_string(),
        _ => style("strong").green().to_string(),
    }
}
