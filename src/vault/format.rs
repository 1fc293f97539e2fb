//! Text encoding of the vault file.
//!
//! A vault file is a pretty-printed JSON array with one object per entry,
//! in display order:
//!
//! ```text
//! [
//!   {
//!     "id": "0b8f…",
//!     "service": "github.com",
//!     "username": "alice",
//!     "encryptedSecret": "<base64 nonce||ciphertext||tag>",
//!     "createdAt": 1718000000000,
//!     "isFavorite": false,
//!     "category": "General",
//!     "notes": ""
//!   }
//! ]
//! ```
//!
//! Every field except `id` is required; a record missing one is rejected
//! rather than defaulted.  Files written before ids existed get a fresh id
//! per record on load.  `encryptedPassword` is accepted as the old name of
//! `encryptedSecret`.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryId};
use crate::errors::{PassVaultError, Result};

/// On-disk shape of one entry.  Field order here is the field order in
/// the file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<EntryId>,
    service: String,
    username: String,
    #[serde(alias = "encryptedPassword")]
    encrypted_secret: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    is_favorite: bool,
    category: String,
    notes: String,
}

impl From<&Entry> for StoredEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id),
            service: entry.service.clone(),
            username: entry.username.clone(),
            encrypted_secret: entry.encrypted_secret.clone(),
            created_at: entry.created_at,
            is_favorite: entry.is_favorite,
            category: entry.category.clone(),
            notes: entry.notes.clone(),
        }
    }
}

impl StoredEntry {
    fn into_entry(self) -> Entry {
        Entry {
            id: self.id.unwrap_or_default(),
            service: self.service,
            username: self.username,
            encrypted_secret: self.encrypted_secret,
            created_at: self.created_at,
            is_favorite: self.is_favorite,
            category: self.category,
            notes: self.notes,
        }
    }
}

/// Encode entries as the exact text stored in the vault file.
///
/// Output is deterministic for a given input and preserves order.
pub fn encode(entries: &[Entry]) -> Result<String> {
    let stored: Vec<StoredEntry> = entries.iter().map(StoredEntry::from).collect();
    let mut text = serde_json::to_string_pretty(&stored)
        .map_err(|e| PassVaultError::Storage(format!("failed to encode entries: {e}")))?;
    text.push('\n');
    Ok(text)
}

/// Parse vault file text back into entries, in file order.
pub fn decode(text: &str) -> Result<Vec<Entry>> {
    let stored: Vec<StoredEntry> = serde_json::from_str(text).map_err(|e| {
        PassVaultError::Parse(format!(
            "line {} column {}: {e}",
            e.line(),
            e.column()
        ))
    })?;

    let mut seen = HashSet::with_capacity(stored.len());
    let mut entries = Vec::with_capacity(stored.len());
    for (index, record) in stored.into_iter().enumerate() {
        let entry = record.into_entry();
        if !seen.insert(entry.id) {
            return Err(PassVaultError::Parse(format!(
                "record {index} repeats id {}",
                entry.id
            )));
        }
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(service: &str) -> Entry {
        Entry {
            id: EntryId::new(),
            service: service.into(),
            username: "bob".into(),
            encrypted_secret: "c2VhbGVk".into(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            is_favorite: true,
            category: "Work".into(),
            notes: "line one\nline two".into(),
        }
    }

    #[test]
    fn encode_uses_camel_case_field_names_in_fixed_order() {
        let text = encode(&[entry("a")]).unwrap();
        let positions: Vec<usize> = [
            "\"id\"",
            "\"service\"",
            "\"username\"",
            "\"encryptedSecret\"",
            "\"createdAt\"",
            "\"isFavorite\"",
            "\"category\"",
            "\"notes\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("1700000000123"));
    }

    #[test]
    fn encode_is_deterministic() {
        let entries = vec![entry("a"), entry("b")];
        assert_eq!(encode(&entries).unwrap(), encode(&entries).unwrap());
    }

    #[test]
    fn decode_preserves_order_and_fields() {
        let entries = vec![entry("first"), entry("second"), entry("third")];
        let decoded = decode(&encode(&entries).unwrap()).unwrap();
        assert!(decoded == entries);
    }

    #[test]
    fn empty_collection_roundtrips() {
        let text = encode(&[]).unwrap();
        assert!(decode(&text).unwrap().is_empty());
    }

    #[test]
    fn missing_field_is_rejected() {
        let text = r#"[{"service":"s","username":"u","encryptedSecret":"x",
            "createdAt":1,"isFavorite":false,"category":"General"}]"#;
        assert!(matches!(decode(text), Err(PassVaultError::Parse(_))));
    }

    #[test]
    fn invalid_boolean_is_rejected() {
        let text = r#"[{"service":"s","username":"u","encryptedSecret":"x",
            "createdAt":1,"isFavorite":"yes","category":"General","notes":""}]"#;
        assert!(matches!(decode(text), Err(PassVaultError::Parse(_))));
    }

    #[test]
    fn invalid_timestamp_is_rejected() {
        let text = r#"[{"service":"s","username":"u","encryptedSecret":"x",
            "createdAt":"yesterday","isFavorite":false,"category":"General","notes":""}]"#;
        assert!(matches!(decode(text), Err(PassVaultError::Parse(_))));
    }

    #[test]
    fn records_without_id_get_distinct_ids() {
        let text = r#"[
            {"service":"a","username":"u","encryptedPassword":"x",
             "createdAt":1,"isFavorite":false,"category":"General","notes":""},
            {"service":"b","username":"u","encryptedPassword":"y",
             "createdAt":2,"isFavorite":true,"category":"General","notes":""}
        ]"#;
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_ne!(decoded[0].id, decoded[1].id);
        assert_eq!(decoded[1].encrypted_secret, "y");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut second = entry("b");
        let first = entry("a");
        second.id = first.id;
        let text = encode(&[first, second]).unwrap();
        assert!(matches!(decode(&text), Err(PassVaultError::Parse(_))));
    }
}
