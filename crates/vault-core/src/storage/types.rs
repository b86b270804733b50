//! Storage record types

use crate::crypto::SALT_LEN;

/// One stored secret: ciphertext and the salt it was sealed under
///
/// The pair is generated together by envelope encryption and must never be
/// separated; the salt is the only way back to the decryption key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    /// Sealed payload: `nonce || ciphertext || tag`
    pub ciphertext: Vec<u8>,
    /// Random per-record KDF salt
    pub salt: [u8; SALT_LEN],
}

impl SecretRecord {
    pub fn new(ciphertext: Vec<u8>, salt: [u8; SALT_LEN]) -> Self {
        Self { ciphertext, salt }
    }
}
