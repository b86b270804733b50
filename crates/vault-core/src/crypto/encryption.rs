//! AES-256-GCM authenticated encryption
//!
//! Wire format: `nonce || ciphertext || auth_tag`
//! - Nonce: 12 bytes (96 bits) - standard for GCM, random per encryption
//! - Auth tag: 16 bytes (128 bits), appended by the AEAD

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;

use super::MasterKey;
use crate::error::{Result, VaultError};

/// Nonce length for AES-GCM
const NONCE_LEN: usize = 12;
/// Auth tag length for AES-GCM
const TAG_LEN: usize = 16;

/// Encrypted payload: nonce plus ciphertext with the tag still appended
#[derive(Debug, Clone)]
pub struct EncryptedData {
    /// Nonce (12 bytes for GCM)
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the 16-byte auth tag appended
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    /// Serialize to the `nonce || ciphertext || tag` blob stored by backends
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse a stored blob back into its parts
    ///
    /// A blob too short to hold a nonce and tag can only come from corrupted
    /// storage, so it reports the same failure as a bad tag.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(VaultError::AuthenticationFailure);
        }

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[..NONCE_LEN]);

        Ok(Self {
            nonce,
            ciphertext: bytes[NONCE_LEN..].to_vec(),
        })
    }
}

/// Encrypt plaintext under the given key with a fresh random nonce
pub fn encrypt(plaintext: &[u8], key: &MasterKey) -> Result<EncryptedData> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(e.to_string()))?;

    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| VaultError::Encryption(e.to_string()))?;

    Ok(EncryptedData { nonce, ciphertext })
}

/// Decrypt with authentication
///
/// Tag mismatch means either a wrong key or tampered data; the two are
/// indistinguishable and both surface as `AuthenticationFailure`.
pub fn decrypt(encrypted: &EncryptedData, key: &MasterKey) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(e.to_string()))?;

    cipher
        .decrypt(
            Nonce::from_slice(&encrypted.nonce),
            encrypted.ciphertext.as_slice(),
        )
        .map_err(|_| VaultError::AuthenticationFailure)
}
