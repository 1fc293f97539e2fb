use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::GeneratorOptions;
use crate::errors::{PassVaultError, Result};
use crate::vault::entry::DEFAULT_CATEGORY;

/// Vault-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key file name or path (relative paths resolve against the vault dir).
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Vault file name or path (relative paths resolve against the vault dir).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Category given to new entries when none is chosen.
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Length of generated passwords (default: 12).
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    #[serde(default = "default_true")]
    pub generator_digits: bool,

    #[serde(default = "default_true")]
    pub generator_upper: bool,

    #[serde(default = "default_true")]
    pub generator_special: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_file() -> String {
    "master.key".to_string()
}

fn default_vault_file() -> String {
    "passwords.dat".to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_generator_length() -> usize {
    12
}

fn default_true() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            vault_file: default_vault_file(),
            default_category: default_category(),
            generator_length: default_generator_length(),
            generator_digits: true,
            generator_upper: true,
            generator_special: true,
        }
    }
}

/// Resolved file locations consumed by `VaultManager`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub key_path: PathBuf,
    pub vault_path: PathBuf,
    pub default_category: String,
}

impl VaultConfig {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Settings::default().vault_config(dir)
    }
}

impl Settings {
    /// Name of the config file we look for in the vault directory.
    pub const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            PassVaultError::Config(format!("Failed to read {}: {e}", config_path.display()))
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve key and vault paths against `dir`.
    ///
    /// Example: `dir/master.key`, `dir/passwords.dat`
    pub fn vault_config(&self, dir: &Path) -> VaultConfig {
        VaultConfig {
            key_path: dir.join(&self.key_file),
            vault_path: dir.join(&self.vault_file),
            default_category: self.default_category.clone(),
        }
    }

    /// Convert the generator settings into crypto-layer options.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            length: self.generator_length,
            digits: self.generator_digits,
            upper: self.generator_upper,
            special: self.generator_special,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
