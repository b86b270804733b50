//! Password-based key derivation using Argon2id

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;

use super::MasterKey;
use crate::error::{Result, VaultError};

/// Salt length in bytes, stored verbatim next to each ciphertext
pub const SALT_LEN: usize = 16;

/// Parameters for Argon2id key derivation
#[derive(Debug, Clone)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65536 = 64MB)
    pub memory_cost: u32,
    /// Time cost / iterations (default: 3)
    pub time_cost: u32,
    /// Parallelism (default: 4)
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 65536, // 64 MB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// Cheap parameters for tests and demos. Not for real secrets.
    pub fn fast() -> Self {
        Self {
            memory_cost: 8192, // 8 MB
            time_cost: 1,
            parallelism: 1,
        }
    }
}

/// Generate a cryptographically secure random salt
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a 256-bit key from a password and a per-record salt using Argon2id
///
/// Deterministic: the same (password, salt) pair always yields the same key.
pub fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> Result<MasterKey> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(32), // Output length: 32 bytes = 256 bits, AES-256 key size
    )
    .map_err(|e| VaultError::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key_bytes = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key_bytes)
        .map_err(|e| VaultError::KeyDerivation(e.to_string()))?;

    Ok(MasterKey::new(key_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_salt() {
        let salt1 = generate_salt();
        let salt2 = generate_salt();

        assert_eq!(salt1.len(), SALT_LEN);
        assert_ne!(salt1, salt2);
    }

    #[test]
    fn test_derive_key_deterministic() {
        let salt = generate_salt();

        let key1 = derive_key("correct horse", &salt, &KdfParams::fast()).unwrap();
        let key2 = derive_key("correct horse", &salt, &KdfParams::fast()).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_passwords() {
        let salt = generate_salt();

        let key1 = derive_key("password1", &salt, &KdfParams::fast()).unwrap();
        let key2 = derive_key("password2", &salt, &KdfParams::fast()).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_derive_key_different_salts() {
        let key1 = derive_key("hunter2", &generate_salt(), &KdfParams::fast()).unwrap();
        let key2 = derive_key("hunter2", &generate_salt(), &KdfParams::fast()).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_too_short_salt_rejected() {
        // Argon2 requires at least 8 salt bytes
        let result = derive_key("hunter2", &[0u8; 4], &KdfParams::fast());
        assert!(matches!(result, Err(VaultError::KeyDerivation(_))));
    }
}
