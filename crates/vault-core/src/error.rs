//! Error types for vault-core

use thiserror::Error;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
///
/// A missing record is not an error: `retrieve` returns `Ok(None)` for it.
/// Wrong master password and tampered ciphertext are deliberately a single
/// variant; the AEAD tag check cannot tell them apart.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("authentication failed: wrong master password or corrupted record")]
    AuthenticationFailure,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("service name must not be empty")]
    InvalidServiceName,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
