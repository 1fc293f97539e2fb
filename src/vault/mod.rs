//! Vault module — credential entries and their persistence.
//!
//! This module provides:
//! - `Entry` and `EntryId` types (`entry`)
//! - The text vault file encoding (`format`)
//! - `VaultStore` for loading and saving the vault file (`store`)
//! - `VaultManager`, the façade front ends use (`manager`)

pub mod entry;
pub mod format;
pub mod manager;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Entry, EntryId, DEFAULT_CATEGORY};
pub use manager::VaultManager;
pub use store::VaultStore;
