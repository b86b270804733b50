//! Vault facade composing envelope crypto with a storage backend

use tracing::{debug, info};

use crate::crypto::{envelope, KdfParams, SecretString};
use crate::error::{Result, VaultError};
use crate::storage::{open_backend, BackendConfig, CredentialStore, SecretRecord};

/// Encrypted credential vault
///
/// Owns one storage backend, chosen at construction. The master password is
/// taken per operation and never held; each stored secret carries its own
/// salt, so no key material survives between calls.
pub struct Vault {
    store: Box<dyn CredentialStore>,
    kdf: KdfParams,
}

impl Vault {
    /// Open a vault over the configured backend with default KDF parameters
    pub fn open(config: BackendConfig) -> Result<Self> {
        Ok(Self::new(open_backend(config)?))
    }

    /// Wrap an already-constructed backend
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self {
            store,
            kdf: KdfParams::default(),
        }
    }

    /// Override the key-derivation parameters (reduced settings for tests)
    pub fn with_kdf_params(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    /// Encrypt a secret under the master password and upsert it
    ///
    /// Storing again under the same name replaces the record wholesale with
    /// a fresh salt and ciphertext.
    pub fn store_secret(
        &mut self,
        service_name: &str,
        plaintext: &str,
        master_password: &str,
    ) -> Result<()> {
        let service_name = validated_name(service_name)?;

        let (ciphertext, salt) = envelope::encrypt(plaintext, master_password, &self.kdf)?;
        self.store
            .store(service_name, SecretRecord::new(ciphertext, salt))?;

        info!(
            "Stored secret for '{}' ({})",
            service_name,
            self.store.backend_name()
        );
        Ok(())
    }

    /// Look up and decrypt a secret
    ///
    /// `Ok(None)` when no record exists; `AuthenticationFailure` when the
    /// password is wrong or the record is corrupt.
    pub fn retrieve_secret(
        &self,
        service_name: &str,
        master_password: &str,
    ) -> Result<Option<SecretString>> {
        let service_name = validated_name(service_name)?;

        let Some(record) = self.store.retrieve(service_name)? else {
            debug!("No record found for '{}'", service_name);
            return Ok(None);
        };

        let plaintext =
            envelope::decrypt(&record.ciphertext, &record.salt, master_password, &self.kdf)?;

        debug!("Decrypted secret for '{}'", service_name);
        Ok(Some(plaintext))
    }

    /// Human-readable name of the active backend
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}

fn validated_name(service_name: &str) -> Result<&str> {
    if service_name.trim().is_empty() {
        return Err(VaultError::InvalidServiceName);
    }
    Ok(service_name)
}
