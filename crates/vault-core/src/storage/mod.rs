//! Storage backends for credential persistence
//!
//! Three interchangeable backends behind one trait:
//! 1. In-memory (volatile)
//! 2. JSON file (full-document rewrite per store)
//! 3. Embedded SQLite (one table, primary-key upserts)

mod json_file;
mod memory;
mod sqlite;
mod traits;
mod types;

use std::path::PathBuf;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::CredentialStore;
pub use types::SecretRecord;

use crate::error::Result;

/// Backend selection, fixed at construction time
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Volatile in-process map
    Memory,
    /// JSON document at the given path
    JsonFile(PathBuf),
    /// SQLite database at the given path
    Sqlite(PathBuf),
}

/// Construct the chosen backend
pub fn open_backend(config: BackendConfig) -> Result<Box<dyn CredentialStore>> {
    Ok(match config {
        BackendConfig::Memory => Box::new(MemoryStore::new()),
        BackendConfig::JsonFile(path) => Box::new(JsonFileStore::open(path)?),
        BackendConfig::Sqlite(path) => Box::new(SqliteStore::open(path)?),
    })
}
