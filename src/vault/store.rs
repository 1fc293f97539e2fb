//! Loading and saving the vault file.
//!
//! `VaultStore` binds the text format to one file path.  Secrets stay
//! sealed on the way in and out; this layer never touches key material.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::entry::Entry;
use super::format;
use crate::errors::{PassVaultError, Result};
use crate::fsutil;

/// Handle to a vault file on disk.
#[derive(Debug, Clone)]
pub struct VaultStore {
    /// Path to the vault file (`passwords.dat` by default).
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry from disk, in file order.
    ///
    /// A missing file is a first run and yields an empty list.
    pub fn load(&self) -> Result<Vec<Entry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no vault file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(PassVaultError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let entries = format::decode(&text)?;
        debug!(path = %self.path.display(), count = entries.len(), "loaded vault");
        Ok(entries)
    }

    /// Replace the vault file with `entries`.
    ///
    /// Goes through a temp file + fsync + rename, so a crash leaves the
    /// previous file intact.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let text = format::encode(entries)?;
        fsutil::write_atomic(&self.path, text.as_bytes()).map_err(|e| {
            PassVaultError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), count = entries.len(), "saved vault");
        Ok(())
    }
}
