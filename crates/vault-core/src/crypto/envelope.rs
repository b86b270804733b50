//! Envelope encryption: one fresh salt and derived key per stored secret

use super::encryption::{self, EncryptedData};
use super::key_derivation::{derive_key, generate_salt, KdfParams, SALT_LEN};
use super::SecretString;
use crate::error::{Result, VaultError};

/// Encrypt a secret under the master password
///
/// Generates a fresh random salt, derives a key from (password, salt) and
/// seals the plaintext. The salt must be stored next to the ciphertext;
/// nothing else can reproduce the key.
pub fn encrypt(
    plaintext: &str,
    master_password: &str,
    params: &KdfParams,
) -> Result<(Vec<u8>, [u8; SALT_LEN])> {
    let salt = generate_salt();
    let key = derive_key(master_password, &salt, params)?;
    let sealed = encryption::encrypt(plaintext.as_bytes(), &key)?;
    Ok((sealed.to_bytes(), salt))
}

/// Decrypt a stored secret with the salt that was persisted alongside it
///
/// Returns `AuthenticationFailure` when the password is wrong or the record
/// was corrupted; never partial plaintext.
pub fn decrypt(
    ciphertext: &[u8],
    salt: &[u8; SALT_LEN],
    master_password: &str,
    params: &KdfParams,
) -> Result<SecretString> {
    let key = derive_key(master_password, salt, params)?;
    let sealed = EncryptedData::from_bytes(ciphertext)?;
    let plaintext = encryption::decrypt(&sealed, &key)?;

    // We only ever seal UTF-8, so a non-UTF-8 result means a corrupt record
    String::from_utf8(plaintext)
        .map(SecretString::new)
        .map_err(|_| VaultError::AuthenticationFailure)
}
