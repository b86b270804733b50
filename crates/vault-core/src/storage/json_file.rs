//! Flat-file storage backend
//!
//! Persists records to a single JSON document mapping service name to
//! base64-encoded ciphertext and salt. The whole document is rewritten on
//! every store; the write goes through a temp file and rename so a crash
//! mid-write cannot leave a torn document behind. Concurrent writers are
//! still last-writer-wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::CredentialStore;
use super::types::SecretRecord;
use crate::crypto::SALT_LEN;
use crate::error::{Result, VaultError};

/// On-disk shape of one record
#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    ciphertext: String,
    salt: String,
}

/// File-backed storage backend
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, SecretRecord>,
}

impl JsonFileStore {
    /// Open the store, loading an existing document if one is present
    ///
    /// A missing file is a fresh, empty store; an unreadable or malformed
    /// file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = Self::load(&path)?;

        debug!("File storage at {:?} loaded {} entries", path, entries.len());
        Ok(Self { path, entries })
    }

    fn load(path: &Path) -> Result<HashMap<String, SecretRecord>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let encoded: HashMap<String, FileEntry> = serde_json::from_str(&contents)?;

        let mut entries = HashMap::with_capacity(encoded.len());
        for (service, entry) in encoded {
            entries.insert(service, Self::decode_entry(&entry)?);
        }
        Ok(entries)
    }

    fn decode_entry(entry: &FileEntry) -> Result<SecretRecord> {
        let ciphertext = BASE64
            .decode(&entry.ciphertext)
            .map_err(|e| VaultError::Storage(format!("invalid ciphertext encoding: {}", e)))?;
        let salt_bytes = BASE64
            .decode(&entry.salt)
            .map_err(|e| VaultError::Storage(format!("invalid salt encoding: {}", e)))?;

        let salt: [u8; SALT_LEN] = salt_bytes.as_slice().try_into().map_err(|_| {
            VaultError::Storage(format!(
                "invalid salt length: expected {}, got {}",
                SALT_LEN,
                salt_bytes.len()
            ))
        })?;

        Ok(SecretRecord::new(ciphertext, salt))
    }

    /// Rewrite the whole document atomically
    fn save(&self) -> Result<()> {
        let encoded: HashMap<&String, FileEntry> = self
            .entries
            .iter()
            .map(|(service, record)| {
                (
                    service,
                    FileEntry {
                        ciphertext: BASE64.encode(&record.ciphertext),
                        salt: BASE64.encode(record.salt),
                    },
                )
            })
            .collect();

        let contents = serde_json::to_string_pretty(&encoded)?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &contents)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!("Saved {} entries to {:?}", self.entries.len(), self.path);
        Ok(())
    }
}

impl CredentialStore for JsonFileStore {
    fn store(&mut self, service_name: &str, record: SecretRecord) -> Result<()> {
        self.entries.insert(service_name.to_string(), record);
        self.save()?;

        debug!("Stored credentials for '{}' in {:?}", service_name, self.path);
        Ok(())
    }

    fn retrieve(&self, service_name: &str) -> Result<Option<SecretRecord>> {
        Ok(self.entries.get(service_name).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "File Storage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(byte: u8) -> SecretRecord {
        SecretRecord::new(vec![byte; 40], [byte; 16])
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("credentials.json")).unwrap();

        assert_eq!(store.retrieve("anything").unwrap(), None);
    }

    #[test]
    fn test_store_and_retrieve() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("credentials.json")).unwrap();

        store.store("openai", record(1)).unwrap();
        assert_eq!(store.retrieve("openai").unwrap(), Some(record(1)));
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.store("openai", record(1)).unwrap();
            store.store("anthropic", record(2)).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.retrieve("openai").unwrap(), Some(record(1)));
        assert_eq!(store.retrieve("anthropic").unwrap(), Some(record(2)));
    }

    #[test]
    fn test_overwrite_replaces_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.store("openai", record(1)).unwrap();
            store.store("openai", record(2)).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.retrieve("openai").unwrap(), Some(record(2)));
    }

    #[test]
    fn test_binary_roundtrip_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");

        let payload = SecretRecord::new((0u8..=255).collect(), [0xAB; 16]);
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.store("svc", payload.clone()).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.retrieve("svc").unwrap(), Some(payload));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(VaultError::Serialization(_))
        ));
    }

    #[test]
    fn test_bad_salt_length_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(
            &path,
            r#"{"svc": {"ciphertext": "AAAA", "salt": "AAAA"}}"#,
        )
        .unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(VaultError::Storage(_))
        ));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.store("openai", record(1)).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
