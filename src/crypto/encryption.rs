//! AES-256-GCM authenticated encryption of single secret strings.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  The whole buffer is then base64-encoded
//! so it can live in the text vault file.
//!
//! Layout of the decoded blob:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use super::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`.
///
/// Returns base64(nonce || ciphertext || tag).  Two calls with the same
/// input never produce the same output.
pub fn encrypt(plaintext: &str, key: &MasterKey) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::KeyIo(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|_| PassVaultError::Format("encryption failed".into()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(blob))
}

/// Decrypt a blob produced by `encrypt`.
///
/// Fails with `Format` when the blob is not base64 or is shorter than a
/// nonce, and with `Authentication` when the tag does not verify.
pub fn decrypt(blob: &str, key: &MasterKey) -> Result<Zeroizing<String>> {
    let raw = BASE64
        .decode(blob.trim())
        .map_err(|e| PassVaultError::Format(format!("not valid base64: {e}")))?;

    if raw.len() < NONCE_LEN {
        return Err(PassVaultError::Format(format!(
            "blob is {} bytes, shorter than the {NONCE_LEN}-byte nonce",
            raw.len()
        )));
    }

    let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::KeyIo(format!("invalid key length: {e}")))?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PassVaultError::Authentication)?;

    String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        PassVaultError::Format("decrypted secret is not valid UTF-8".into())
    })
}
