//! # vault-core
//!
//! Core functionality for the API key vault:
//! - Envelope encryption: AES-256-GCM under an Argon2id key derived per
//!   record from the master password and a random 16-byte salt
//! - Pluggable credential storage (in-memory, JSON file, embedded SQLite)
//! - Zeroize-on-drop handling for keys and decrypted secrets

pub mod crypto;
pub mod error;
pub mod storage;
mod vault;

pub use crypto::{KdfParams, MasterKey, SecretString};
pub use error::{Result, VaultError};
pub use storage::{
    open_backend, BackendConfig, CredentialStore, JsonFileStore, MemoryStore, SecretRecord,
    SqliteStore,
};
pub use vault::Vault;
