//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption of single secrets (`encryption`)
//! - The `MasterKey` type (`keys`)
//! - Key file loading, generation and rotation (`keystore`)
//! - Password generation and strength scoring (`generator`)

pub mod encryption;
pub mod generator;
pub mod keys;
pub mod keystore;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, MasterKey, KeyStore};
pub use encryption::{decrypt, encrypt};
pub use generator::{generate_password, password_strength, GeneratorOptions};
pub use keys::MasterKey;
pub use keystore::KeyStore;
