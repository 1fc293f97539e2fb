//! The in-memory vault and every operation callers are allowed to perform.
//!
//! `VaultManager` is the only type front ends should talk to.  It owns the
//! `KeyStore` and `VaultStore` for one vault and keeps the authoritative
//! entry list behind a single mutex: mutations are serialized end to end
//! (read, modify, persist), and reads see a consistent snapshot.
//!
//! Every mutation builds the next entry list, writes it to disk, and only
//! then swaps it into memory, so a failed save leaves memory and disk
//! agreeing with each other.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{SubsecRound, Utc};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::entry::{Entry, EntryId};
use super::store::VaultStore;
use crate::config::VaultConfig;
use crate::crypto::{decrypt, encrypt, KeyStore, MasterKey};
use crate::errors::{PassVaultError, Result};

/// Entries keyed by id, plus the display order.
#[derive(Clone, Default)]
struct EntryArena {
    order: Vec<EntryId>,
    by_id: HashMap<EntryId, Entry>,
}

impl EntryArena {
    fn from_entries(entries: Vec<Entry>) -> Self {
        let mut arena = Self::default();
        for entry in entries {
            arena.push(entry);
        }
        arena
    }

    fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    fn to_vec(&self) -> Vec<Entry> {
        self.iter().cloned().collect()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.by_id.get(id)
    }

    fn push(&mut self, entry: Entry) {
        self.order.push(entry.id);
        self.by_id.insert(entry.id, entry);
    }

    /// Swap in a new value for an existing id, keeping its position.
    fn replace(&mut self, entry: Entry) {
        if let Some(slot) = self.by_id.get_mut(&entry.id) {
            *slot = entry;
        }
    }

    fn remove(&mut self, id: &EntryId) -> Option<Entry> {
        let removed = self.by_id.remove(id)?;
        self.order.retain(|other| other != id);
        Some(removed)
    }
}

struct State {
    keys: KeyStore,
    store: VaultStore,

    /// `None` until `initialize` has loaded the vault.
    entries: Option<EntryArena>,
}

impl State {
    fn entries(&self) -> Result<&EntryArena> {
        self.entries.as_ref().ok_or(PassVaultError::NotInitialized)
    }

    /// Persist `next` and make it the in-memory list.
    fn commit(&mut self, next: EntryArena) -> Result<()> {
        self.store.save(&next.to_vec())?;
        self.entries = Some(next);
        Ok(())
    }

    /// Resolve a rotation that was interrupted between staging the new key
    /// and promoting it.  The staged key wins if it opens the stored
    /// entries, otherwise the vault on disk still belongs to the old key.
    fn recover_interrupted_rotation(&mut self, entries: &[Entry]) -> Result<()> {
        let Some(staged) = self.keys.staged_key()? else {
            return Ok(());
        };

        let entries_use_staged_key = entries.is_empty()
            || entries
                .iter()
                .any(|entry| decrypt(&entry.encrypted_secret, &staged).is_ok());

        if entries_use_staged_key {
            warn!("finishing interrupted master key rotation");
            self.keys.commit_staged(staged)
        } else {
            warn!("discarding master key from an interrupted rotation");
            self.keys.discard_staged()
        }
    }
}

/// The vault façade used by front ends.
pub struct VaultManager {
    state: Mutex<State>,
    default_category: String,
}

impl VaultManager {
    /// Create a manager for the files named in `config`.  Nothing is read
    /// until `initialize` is called.
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            state: Mutex::new(State {
                keys: KeyStore::new(&config.key_path),
                store: VaultStore::new(&config.vault_path),
                entries: None,
            }),
            default_category: config.default_category.clone(),
        }
    }

    // All state changes happen after the last fallible step, so a panic
    // in another thread cannot leave the state half-updated.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Load the vault and master key.  Safe to call more than once; only
    /// the first successful call does any work.
    pub fn initialize(&self) -> Result<()> {
        let mut state = self.lock();
        if state.entries.is_some() {
            return Ok(());
        }

        let entries = state.store.load()?;
        state.recover_interrupted_rotation(&entries)?;

        if !entries.is_empty() && !state.keys.path().exists() {
            return Err(PassVaultError::KeyIo(format!(
                "{} holds {} entries but key file {} is missing",
                state.store.path().display(),
                entries.len(),
                state.keys.path().display()
            )));
        }
        state.keys.active_key()?;

        info!(count = entries.len(), "vault initialized");
        state.entries = Some(EntryArena::from_entries(entries));
        Ok(())
    }

    /// Returns `true` once `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.lock().entries.is_some()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Encrypt `secret` and append a new entry.
    ///
    /// `category` falls back to the configured default when absent or
    /// blank; `notes` defaults to empty.
    pub fn add_entry(
        &self,
        service: &str,
        username: &str,
        secret: &str,
        category: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Entry> {
        if service.trim().is_empty() {
            return Err(PassVaultError::Validation("service cannot be empty".into()));
        }
        if username.trim().is_empty() {
            return Err(PassVaultError::Validation("username cannot be empty".into()));
        }
        if secret.is_empty() {
            return Err(PassVaultError::Validation("secret cannot be empty".into()));
        }

        let mut guard = self.lock();
        let state = &mut *guard;
        let current = state.entries.as_ref().ok_or(PassVaultError::NotInitialized)?;
        let key = state.keys.active_key()?;

        let entry = Entry {
            id: EntryId::new(),
            service: service.to_string(),
            username: username.to_string(),
            encrypted_secret: encrypt(secret, key)?,
            created_at: Utc::now().trunc_subsecs(3),
            is_favorite: false,
            category: category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(&self.default_category)
                .to_string(),
            notes: notes.unwrap_or_default().to_string(),
        };

        let mut next = current.clone();
        next.push(entry.clone());
        state.commit(next)?;

        debug!(id = %entry.id, service = %entry.service, "added entry");
        Ok(entry)
    }

    /// Remove the entry with `id`.  Unknown ids are ignored.
    pub fn remove_entry(&self, id: EntryId) -> Result<()> {
        let mut state = self.lock();
        let mut next = state.entries()?.clone();
        if next.remove(&id).is_none() {
            debug!(%id, "remove: no such entry");
            return Ok(());
        }
        state.commit(next)?;
        debug!(%id, "removed entry");
        Ok(())
    }

    /// Flip the favorite flag.  Unknown ids are ignored.
    pub fn toggle_favorite(&self, id: EntryId) -> Result<()> {
        self.update_with(id, "toggle favorite", Entry::with_favorite_toggled)
    }

    /// Move an entry to `category`.  Unknown ids are ignored.
    pub fn update_category(&self, id: EntryId, category: &str) -> Result<()> {
        self.update_with(id, "update category", |e| e.with_category(category))
    }

    /// Replace an entry's notes.  Unknown ids are ignored.
    pub fn update_notes(&self, id: EntryId, notes: &str) -> Result<()> {
        self.update_with(id, "update notes", |e| e.with_notes(notes))
    }

    fn update_with(&self, id: EntryId, op: &str, f: impl FnOnce(&Entry) -> Entry) -> Result<()> {
        let mut state = self.lock();
        let current = state.entries()?;
        let Some(existing) = current.get(&id) else {
            debug!(%id, "{op}: no such entry");
            return Ok(());
        };

        let updated = f(existing);
        let mut next = current.clone();
        next.replace(updated);
        state.commit(next)?;

        debug!(%id, "{op}");
        Ok(())
    }

    /// Re-encrypt every secret under a freshly generated master key.
    ///
    /// All-or-nothing: if any secret fails to decrypt, or any write fails,
    /// the key file, vault file and in-memory state are left as they were.
    ///
    /// Commit order on disk:
    /// 1. stage the new key in the pending key file;
    /// 2. save the re-encrypted entries;
    /// 3. rename the pending key over the key file.
    pub fn change_master_key(&self) -> Result<()> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let current = state.entries.as_ref().ok_or(PassVaultError::NotInitialized)?;
        let old_key = state.keys.active_key()?.clone();
        let new_key = MasterKey::generate();

        let mut rekeyed = Vec::with_capacity(current.len());
        for entry in current.iter() {
            let plaintext = decrypt(&entry.encrypted_secret, &old_key)?;
            rekeyed.push(Entry {
                encrypted_secret: encrypt(&plaintext, &new_key)?,
                ..entry.clone()
            });
        }
        let previous = current.to_vec();

        state.keys.stage(&new_key)?;

        if let Err(e) = state.store.save(&rekeyed) {
            if let Err(cleanup) = state.keys.discard_staged() {
                warn!(error = %cleanup, "could not remove pending master key");
            }
            return Err(e);
        }

        if let Err(e) = state.keys.commit_staged(new_key) {
            match state.store.save(&previous) {
                Ok(()) => {
                    if let Err(cleanup) = state.keys.discard_staged() {
                        warn!(error = %cleanup, "could not remove pending master key");
                    }
                }
                Err(rollback) => {
                    warn!(error = %rollback, "rollback failed; rotation will finish on next start");
                }
            }
            return Err(e);
        }

        info!(count = rekeyed.len(), "re-encrypted entries under new master key");
        state.entries = Some(EntryArena::from_entries(rekeyed));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Snapshot of every entry in display order.
    pub fn list_all(&self) -> Result<Vec<Entry>> {
        Ok(self.lock().entries()?.to_vec())
    }

    /// Look up one entry by id.
    pub fn get(&self, id: EntryId) -> Result<Option<Entry>> {
        Ok(self.lock().entries()?.get(&id).cloned())
    }

    /// Number of entries in the vault.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock().entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Entries whose service, username, category or notes contain `query`,
    /// ignoring case.  An empty query matches everything.
    pub fn find_entries(&self, query: &str) -> Result<Vec<Entry>> {
        let needle = query.to_lowercase();
        self.filtered(|entry| entry.matches(&needle))
    }

    /// Entries marked as favorite.
    pub fn favorites(&self) -> Result<Vec<Entry>> {
        self.filtered(|entry| entry.is_favorite)
    }

    /// Entries in exactly `category`.
    pub fn entries_in_category(&self, category: &str) -> Result<Vec<Entry>> {
        self.filtered(|entry| entry.category == category)
    }

    /// Distinct categories currently in use, sorted.
    pub fn get_all_categories(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .lock()
            .entries()?
            .iter()
            .map(|entry| entry.category.clone())
            .collect())
    }

    fn filtered(&self, keep: impl Fn(&Entry) -> bool) -> Result<Vec<Entry>> {
        Ok(self
            .lock()
            .entries()?
            .iter()
            .filter(|entry| keep(entry))
            .cloned()
            .collect())
    }

    /// Decrypt an entry's secret for display or copying.
    ///
    /// The entry is looked up by id, so a copy taken before a key change
    /// still reveals, and a removed entry does not.  The plaintext is not
    /// cached and is wiped when the returned value is dropped.
    pub fn reveal_secret(&self, entry: &Entry) -> Result<Zeroizing<String>> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let stored = state
            .entries
            .as_ref()
            .ok_or(PassVaultError::NotInitialized)?
            .get(&entry.id)
            .ok_or_else(|| PassVaultError::EntryNotFound(entry.id.to_string()))?;
        let key = state.keys.active_key()?;
        decrypt(&stored.encrypted_secret, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> VaultManager {
        VaultManager::new(&VaultConfig::in_dir(dir.path()))
    }

    #[test]
    fn operations_before_initialize_are_rejected() {
        let dir = TempDir::new().unwrap();
        let vault = manager(&dir);

        assert!(!vault.is_initialized());
        assert!(matches!(
            vault.add_entry("svc", "user", "pw", None, None),
            Err(PassVaultError::NotInitialized)
        ));
        assert!(matches!(
            vault.toggle_favorite(EntryId::new()),
            Err(PassVaultError::NotInitialized)
        ));
        assert!(matches!(
            vault.find_entries("x"),
            Err(PassVaultError::NotInitialized)
        ));
        assert!(matches!(
            vault.change_master_key(),
            Err(PassVaultError::NotInitialized)
        ));
    }

    #[test]
    fn initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let vault = manager(&dir);
        vault.initialize().unwrap();
        let entry = vault.add_entry("svc", "user", "pw", None, None).unwrap();

        // A second call must not reload and drop in-memory state.
        vault.initialize().unwrap();
        assert_eq!(vault.list_all().unwrap(), vec![entry]);
    }

    #[test]
    fn blank_category_uses_default() {
        let dir = TempDir::new().unwrap();
        let vault = manager(&dir);
        vault.initialize().unwrap();

        let entry = vault.add_entry("svc", "user", "pw", Some("  "), None).unwrap();
        assert_eq!(entry.category, "General");
        assert!(entry.notes.is_empty());
    }

    #[test]
    fn validation_rejects_empty_fields() {
        let dir = TempDir::new().unwrap();
        let vault = manager(&dir);
        vault.initialize().unwrap();

        for (service, username, secret) in [("", "u", "p"), ("s", " ", "p"), ("s", "u", "")] {
            assert!(matches!(
                vault.add_entry(service, username, secret, None, None),
                Err(PassVaultError::Validation(_))
            ));
        }
        assert!(vault.is_empty().unwrap());
    }

    #[test]
    fn failed_save_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let vault_dir = dir.path().join("vault");
        std::fs::create_dir(&vault_dir).unwrap();
        let vault = VaultManager::new(&VaultConfig::in_dir(&vault_dir));
        vault.initialize().unwrap();

        // Make the vault path a directory so the rename fails.
        std::fs::create_dir(vault_dir.join("passwords.dat")).unwrap();

        assert!(matches!(
            vault.add_entry("svc", "user", "pw", None, None),
            Err(PassVaultError::Storage(_))
        ));
        assert!(vault.is_empty().unwrap());
    }

    #[test]
    fn reveal_uses_stored_record() {
        let dir = TempDir::new().unwrap();
        let vault = manager(&dir);
        vault.initialize().unwrap();

        let entry = vault.add_entry("svc", "user", "pw", None, None).unwrap();
        let stale = Entry {
            encrypted_secret: "not-a-blob".into(),
            ..entry.clone()
        };
        assert_eq!(vault.reveal_secret(&stale).unwrap().as_str(), "pw");

        vault.remove_entry(entry.id).unwrap();
        assert!(matches!(
            vault.reveal_secret(&entry),
            Err(PassVaultError::EntryNotFound(_))
        ));
    }

    #[test]
    fn arena_replace_keeps_position() {
        let make = |service: &str| Entry {
            id: EntryId::new(),
            service: service.into(),
            username: "u".into(),
            encrypted_secret: String::new(),
            created_at: Utc::now(),
            is_favorite: false,
            category: "General".into(),
            notes: String::new(),
        };
        let (a, b, c) = (make("a"), make("b"), make("c"));
        let mut arena = EntryArena::from_entries(vec![a.clone(), b.clone(), c.clone()]);

        arena.replace(b.with_notes("changed"));
        let services: Vec<_> = arena.iter().map(|e| e.service.as_str()).collect();
        assert_eq!(services, ["a", "b", "c"]);
        assert_eq!(arena.get(&b.id).unwrap().notes, "changed");

        arena.remove(&a.id);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.to_vec()[0].id, b.id);
    }
}
