//! Key file management.
//!
//! `KeyStore` owns the active master key for one vault.  The key is read
//! from the key file on first use; when no key file exists a new key is
//! generated and written before it is handed out.
//!
//! Re-keying goes through a pending file next to the key file
//! (`master.key.pending`).  The new key is staged there first, the caller
//! rewrites the vault, and only then is the pending file renamed over the
//! key file.  A pending file found at startup means a rotation was cut
//! short; `VaultManager::initialize` decides whether to promote or discard
//! it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::keys::MasterKey;
use crate::errors::{PassVaultError, Result};
use crate::fsutil;

/// Suffix appended to the key file name while a rotation is in flight.
const PENDING_SUFFIX: &str = "pending";

pub struct KeyStore {
    /// Path to the key file on disk.
    path: PathBuf,

    /// The active key, loaded lazily.
    active: Option<MasterKey>,
}

impl KeyStore {
    /// Create a key store for `path`.  Nothing is read until the key is
    /// first needed.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            active: None,
        }
    }

    /// Returns the path to the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path used to stage a key during rotation.
    pub fn pending_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        self.path.with_file_name(format!("{name}.{PENDING_SUFFIX}"))
    }

    /// Returns `true` once the key has been loaded or generated.
    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    /// Return the active key, loading or creating the key file on first use.
    pub fn active_key(&mut self) -> Result<&MasterKey> {
        if self.active.is_none() {
            let key = if self.path.exists() {
                let key = read_key_file(&self.path)?;
                debug!(path = %self.path.display(), "loaded master key");
                key
            } else {
                let key = MasterKey::generate();
                write_key_file(&self.path, &key)?;
                info!(path = %self.path.display(), "generated new master key");
                key
            };
            self.active = Some(key);
        }

        self.active
            .as_ref()
            .ok_or_else(|| PassVaultError::KeyIo("master key unavailable".into()))
    }

    /// Persist `new_key` over the key file and make it active.
    ///
    /// On failure the previously active key stays active.
    pub fn rotate(&mut self, new_key: MasterKey) -> Result<()> {
        write_key_file(&self.path, &new_key)?;
        self.active = Some(new_key);
        info!(path = %self.path.display(), "master key rotated");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Two-phase rotation
    // ------------------------------------------------------------------

    /// Write `new_key` to the pending file without touching the active key.
    pub fn stage(&self, new_key: &MasterKey) -> Result<()> {
        write_key_file(&self.pending_path(), new_key)?;
        debug!("staged pending master key");
        Ok(())
    }

    /// Promote the pending file over the key file and activate `new_key`.
    pub fn commit_staged(&mut self, new_key: MasterKey) -> Result<()> {
        fs::rename(self.pending_path(), &self.path)
            .map_err(|e| PassVaultError::KeyIo(format!("failed to promote pending key: {e}")))?;
        fsutil::sync_parent(&self.path);
        self.active = Some(new_key);
        info!(path = %self.path.display(), "master key rotated");
        Ok(())
    }

    /// Remove the pending file, if any.
    pub fn discard_staged(&self) -> Result<()> {
        let pending = self.pending_path();
        if pending.exists() {
            fs::remove_file(&pending).map_err(|e| {
                PassVaultError::KeyIo(format!("failed to remove pending key: {e}"))
            })?;
            debug!("discarded pending master key");
        }
        Ok(())
    }

    /// Read the pending key left behind by an interrupted rotation.
    pub fn staged_key(&self) -> Result<Option<MasterKey>> {
        let pending = self.pending_path();
        if !pending.exists() {
            return Ok(None);
        }
        read_key_file(&pending).map(Some)
    }
}

/// Read and decode a key file.
fn read_key_file(path: &Path) -> Result<MasterKey> {
    let contents = fs::read_to_string(path).map_err(|e| {
        PassVaultError::KeyIo(format!("failed to read {}: {e}", path.display()))
    })?;
    let contents = zeroize::Zeroizing::new(contents);
    MasterKey::from_base64(&contents)
}

/// Write `key` as a single base64 line, atomically.
fn write_key_file(path: &Path, key: &MasterKey) -> Result<()> {
    let mut line = key.to_base64();
    line.push('\n');
    fsutil::write_atomic(path, line.as_bytes()).map_err(|e| {
        PassVaultError::KeyIo(format!("failed to write {}: {e}", path.display()))
    })
}
