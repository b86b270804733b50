//! Cryptographic primitives for secure credential storage
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption
//! - Argon2id key derivation from passwords
//! - Per-record envelope encryption
//! - Secure memory handling with zeroize

mod encryption;
pub mod envelope;
mod key_derivation;
mod secure_memory;

pub use encryption::{decrypt, encrypt, EncryptedData};
pub use key_derivation::{derive_key, generate_salt, KdfParams, SALT_LEN};
pub use secure_memory::{MasterKey, SecretString};
