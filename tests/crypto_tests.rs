//! Integration tests for the PassVault crypto module.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use passvault::crypto::{decrypt, encrypt, generate_password, GeneratorOptions, MasterKey};
use passvault::errors::PassVaultError;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = MasterKey::new([0xAB; 32]);
    let plaintext = "correct horse battery staple";

    let blob = encrypt(plaintext, &key).expect("encrypt should succeed");

    // 12-byte nonce + ciphertext + 16-byte tag.
    let raw = STANDARD.decode(&blob).unwrap();
    assert_eq!(raw.len(), 12 + plaintext.len() + 16);

    let recovered = decrypt(&blob, &key).expect("decrypt should succeed");
    assert_eq!(recovered.as_str(), plaintext);
}

#[test]
fn encrypt_roundtrips_empty_and_unicode_text() {
    let key = MasterKey::generate();

    for plaintext in ["", "pässwörd ✓ 密码"] {
        let blob = encrypt(plaintext, &key).unwrap();
        assert_eq!(decrypt(&blob, &key).unwrap().as_str(), plaintext);
    }
}

#[test]
fn encrypt_produces_different_blob_each_time() {
    let key = MasterKey::new([0xCD; 32]);

    let a = encrypt("hello", &key).unwrap();
    let b = encrypt("hello", &key).unwrap();

    // Each call draws a fresh nonce.
    assert_ne!(a, b, "two encryptions of the same plaintext must differ");
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn decrypt_with_wrong_key_is_authentication_error() {
    let key = MasterKey::new([0x11; 32]);
    let wrong_key = MasterKey::new([0x22; 32]);

    let blob = encrypt("TOP_SECRET", &key).unwrap();

    assert!(matches!(
        decrypt(&blob, &wrong_key),
        Err(PassVaultError::Authentication)
    ));
}

#[test]
fn tampered_blob_is_authentication_error() {
    let key = MasterKey::generate();
    let blob = encrypt("S3cr3t!", &key).unwrap();

    // Flip one bit in the ciphertext body (after the nonce).
    let mut raw = STANDARD.decode(&blob).unwrap();
    raw[14] ^= 0x01;
    let tampered = STANDARD.encode(&raw);

    assert!(matches!(
        decrypt(&tampered, &key),
        Err(PassVaultError::Authentication)
    ));
}

#[test]
fn tampered_tag_is_authentication_error() {
    let key = MasterKey::generate();
    let blob = encrypt("S3cr3t!", &key).unwrap();

    let mut raw = STANDARD.decode(&blob).unwrap();
    let last = raw.len() - 1;
    raw[last] ^= 0x80;

    assert!(matches!(
        decrypt(&STANDARD.encode(&raw), &key),
        Err(PassVaultError::Authentication)
    ));
}

#[test]
fn flipping_any_byte_is_authentication_error() {
    let key = MasterKey::generate();
    let blob = encrypt("S3cr3t!", &key).unwrap();
    let raw = STANDARD.decode(&blob).unwrap();

    // Nonce, ciphertext and tag alike.
    for index in 0..raw.len() {
        let mut tampered = raw.clone();
        tampered[index] ^= 0x01;
        assert!(
            matches!(
                decrypt(&STANDARD.encode(&tampered), &key),
                Err(PassVaultError::Authentication)
            ),
            "flipping byte {index} was not detected"
        );
    }
}

#[test]
fn invalid_base64_is_format_error() {
    let key = MasterKey::generate();
    assert!(matches!(
        decrypt("not base64 at all!!", &key),
        Err(PassVaultError::Format(_))
    ));
}

#[test]
fn blob_shorter_than_nonce_is_format_error() {
    let key = MasterKey::generate();
    let short = STANDARD.encode([0u8; 5]);
    assert!(matches!(
        decrypt(&short, &key),
        Err(PassVaultError::Format(_))
    ));
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

#[test]
fn master_key_base64_roundtrip() {
    let key = MasterKey::generate();
    let encoded = key.to_base64();

    let decoded = MasterKey::from_base64(&encoded).unwrap();
    assert_eq!(decoded.as_bytes(), key.as_bytes());

    // A blob sealed by one copy opens with the other.
    let blob = encrypt("shared", &key).unwrap();
    assert_eq!(decrypt(&blob, &decoded).unwrap().as_str(), "shared");
}

#[test]
fn generated_keys_differ() {
    let a = MasterKey::generate();
    let b = MasterKey::generate();
    assert_ne!(a.as_bytes(), b.as_bytes());
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

#[test]
fn generated_password_respects_character_classes() {
    let options = GeneratorOptions {
        length: 64,
        digits: false,
        upper: false,
        special: false,
    };

    let password = generate_password(&options);
    assert_eq!(password.chars().count(), 64);
    assert!(password.chars().all(|c| c.is_ascii_lowercase()));
}
