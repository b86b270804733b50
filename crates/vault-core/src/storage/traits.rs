//! Storage trait definitions

use super::types::SecretRecord;
use crate::error::Result;

/// Trait for credential storage backends
///
/// Synchronous and single-writer: the vault is an interactive single-session
/// tool and backends are not expected to serialize concurrent access.
pub trait CredentialStore {
    /// Upsert the record for a service name
    ///
    /// Persistent backends must have written the record durably before
    /// returning. Replacing an existing record discards the old ciphertext
    /// and salt entirely.
    fn store(&mut self, service_name: &str, record: SecretRecord) -> Result<()>;

    /// Exact-match lookup by service name
    ///
    /// `Ok(None)` means no record exists; errors are reserved for I/O and
    /// corruption of the storage medium itself.
    fn retrieve(&self, service_name: &str) -> Result<Option<SecretRecord>>;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}
