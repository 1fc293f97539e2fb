use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Caller input ---
    #[error("Invalid input: {0}")]
    Validation(String),

    // --- Key material ---
    #[error("Key file error: {0}")]
    KeyIo(String),

    // --- Crypto errors ---
    #[error("Authentication failed: wrong key or corrupted data")]
    Authentication,

    #[error("Malformed ciphertext: {0}")]
    Format(String),

    // --- Vault file errors ---
    #[error("Invalid vault file: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Vault is not initialized; call initialize() first")]
    NotInitialized,

    #[error("No entry matches '{0}'")]
    EntryNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Audit error: {0}")]
    Audit(String),
}

impl From<std::io::Error> for PassVaultError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
