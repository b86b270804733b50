//! In-memory storage backend
//!
//! Volatile map with no persistence; everything is lost at process exit.

use std::collections::HashMap;

use tracing::debug;

use super::traits::CredentialStore;
use super::types::SecretRecord;
use crate::error::Result;

/// Volatile in-process storage backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, SecretRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn store(&mut self, service_name: &str, record: SecretRecord) -> Result<()> {
        self.entries.insert(service_name.to_string(), record);
        debug!("Stored credentials for '{}' in memory", service_name);
        Ok(())
    }

    fn retrieve(&self, service_name: &str) -> Result<Option<SecretRecord>> {
        Ok(self.entries.get(service_name).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "In-Memory Storage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(byte: u8) -> SecretRecord {
        SecretRecord::new(vec![byte; 40], [byte; 16])
    }

    #[test]
    fn test_store_and_retrieve() {
        let mut store = MemoryStore::new();
        store.store("openai", record(1)).unwrap();

        assert_eq!(store.retrieve("openai").unwrap(), Some(record(1)));
    }

    #[test]
    fn test_retrieve_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.retrieve("unknown-service").unwrap(), None);
    }

    #[test]
    fn test_overwrite_replaces() {
        let mut store = MemoryStore::new();
        store.store("openai", record(1)).unwrap();
        store.store("openai", record(2)).unwrap();

        assert_eq!(store.retrieve("openai").unwrap(), Some(record(2)));
    }

    #[test]
    fn test_exact_match_only() {
        let mut store = MemoryStore::new();
        store.store("openai", record(1)).unwrap();

        assert_eq!(store.retrieve("open").unwrap(), None);
        assert_eq!(store.retrieve("OpenAI").unwrap(), None);
    }
}
