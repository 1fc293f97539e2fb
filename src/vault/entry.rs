//! Credential entries held in a vault.
//!
//! An `Entry` keeps its secret sealed: `encrypted_secret` is the base64
//! blob produced by `crypto::encrypt` under the vault's current key.
//! Decryption only happens on demand through `VaultManager::reveal_secret`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned when the caller does not pick one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Stable identifier assigned to an entry when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single credential record.
#[derive(Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,

    /// Service or site name (e.g. "github.com").
    pub service: String,

    pub username: String,

    /// base64(nonce || ciphertext || tag).
    pub encrypted_secret: String,

    /// When this entry was created (millisecond precision on disk).
    pub created_at: DateTime<Utc>,

    pub is_favorite: bool,

    pub category: String,

    /// Free-form notes; empty by default.
    pub notes: String,
}

impl Entry {
    /// Copy of this entry with the favorite flag flipped.
    pub fn with_favorite_toggled(&self) -> Self {
        Self {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }

    /// Copy of this entry in a different category.
    pub fn with_category(&self, category: &str) -> Self {
        Self {
            category: category.to_string(),
            ..self.clone()
        }
    }

    /// Copy of this entry with replaced notes.
    pub fn with_notes(&self, notes: &str) -> Self {
        Self {
            notes: notes.to_string(),
            ..self.clone()
        }
    }

    /// Case-insensitive substring match against service, username,
    /// category and notes.  `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [&self.service, &self.username, &self.category, &self.notes]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

// The sealed secret is left out so entries can be logged or printed freely.
impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("created_at", &self.created_at)
            .field("is_favorite", &self.is_favorite)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}
