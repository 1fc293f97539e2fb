//! CLI module — Clap argument parser, output helpers, and command implementations.
//!
//! The CLI is a thin launcher over `VaultManager`; it never touches the
//! key store, cipher or vault file directly.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::{Entry, VaultManager};

/// PassVault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(name = "passvault", about = "Local encrypted credential vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the key file, vault file and .passvault.toml
    #[arg(short, long, env = "PASSVAULT_DIR", default_value = ".", global = true)]
    pub dir: String,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the key file and an empty vault
    Init,

    /// Add a credential
    Add {
        /// Service or site name (e.g. github.com)
        service: String,
        /// Account user name
        username: String,
        /// Category (default from config, usually "General")
        #[arg(short, long)]
        category: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,
    },

    /// List credentials
    List {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Search service, username, category and notes
    Find {
        /// Case-insensitive search text
        query: String,
    },

    /// Decrypt and print a credential's secret
    Reveal {
        /// Entry id (any unique prefix)
        id: String,
        /// Copy to the clipboard instead of printing
        #[arg(long)]
        copy: bool,
    },

    /// Remove a credential
    Remove {
        /// Entry id (any unique prefix)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Toggle a credential's favorite flag
    Favorite {
        /// Entry id (any unique prefix)
        id: String,
    },

    /// Move a credential to another category
    Category {
        /// Entry id (any unique prefix)
        id: String,
        /// New category name
        name: String,
    },

    /// Replace a credential's notes
    Notes {
        /// Entry id (any unique prefix)
        id: String,
        /// New notes (empty string clears them)
        text: String,
    },

    /// List categories in use
    Categories,

    /// Generate a new master key and re-encrypt every secret
    RotateKey,

    /// Generate a random password
    Generate {
        /// Password length (default from config, usually 12)
        #[arg(short, long)]
        length: Option<usize>,
        /// Leave out digits
        #[arg(long)]
        no_digits: bool,
        /// Leave out uppercase letters
        #[arg(long)]
        no_upper: bool,
        /// Leave out special characters
        #[arg(long)]
        no_special: bool,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// The vault directory from `--dir`, made absolute.
pub fn vault_dir(cli: &Cli) -> Result<PathBuf> {
    let dir = PathBuf::from(&cli.dir);
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

/// Load `.passvault.toml` from the vault directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&vault_dir(cli)?)
}

/// Build and initialize the vault manager for this invocation.
pub fn open_vault(cli: &Cli) -> Result<VaultManager> {
    let dir = vault_dir(cli)?;
    if !dir.is_dir() {
        return Err(PassVaultError::CommandFailed(format!(
            "vault directory {} does not exist; run `passvault init` first",
            dir.display()
        )));
    }
    let settings = Settings::load(&dir)?;
    let vault = VaultManager::new(&settings.vault_config(&dir));
    vault.initialize()?;
    Ok(vault)
}

/// Find the single entry whose id starts with `prefix`.
pub fn resolve_entry(vault: &VaultManager, prefix: &str) -> Result<Entry> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Err(PassVaultError::CommandFailed("entry id cannot be empty".into()));
    }

    let mut matches: Vec<Entry> = vault
        .list_all()?
        .into_iter()
        .filter(|entry| entry.id.to_string().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(PassVaultError::EntryNotFound(prefix)),
        1 => Ok(matches.remove(0)),
        n => Err(PassVaultError::CommandFailed(format!(
            "id prefix '{prefix}' matches {n} entries; use more characters"
        ))),
    }
}

/// Record an operation in the audit log, if compiled in.
pub fn log_audit(cli: &Cli, op: &str, service: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    if let Ok(dir) = vault_dir(cli) {
        crate::audit::log_audit(&dir, op, service, details);
    }

    #[cfg(not(feature = "audit-log"))]
    let _ = (cli, op, service, details);
}
