//! Embedded SQLite storage backend
//!
//! One table keyed by service name; upserts ride on the primary key via
//! `INSERT OR REPLACE`. The connection is owned by the store and closed
//! when it drops.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::traits::CredentialStore;
use super::types::SecretRecord;
use crate::crypto::SALT_LEN;
use crate::error::{Result, VaultError};

/// SQLite-backed storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database file, creating it and the table if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        debug!("Opened database storage at {:?}", path);
        Self::init(conn)
    }

    /// Open a transient in-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS credentials (
                service_name TEXT PRIMARY KEY,
                ciphertext   BLOB NOT NULL,
                salt         BLOB NOT NULL
            )",
            [],
        )?;

        Ok(Self { conn })
    }
}

impl CredentialStore for SqliteStore {
    fn store(&mut self, service_name: &str, record: SecretRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO credentials (service_name, ciphertext, salt)
             VALUES (?1, ?2, ?3)",
            params![service_name, record.ciphertext, record.salt.as_slice()],
        )?;

        debug!("Stored credentials for '{}' in the database", service_name);
        Ok(())
    }

    fn retrieve(&self, service_name: &str) -> Result<Option<SecretRecord>> {
        let row: Option<(Vec<u8>, Vec<u8>)> = self
            .conn
            .query_row(
                "SELECT ciphertext, salt FROM credentials WHERE service_name = ?1",
                params![service_name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((ciphertext, salt_bytes)) = row else {
            return Ok(None);
        };

        let salt: [u8; SALT_LEN] = salt_bytes.as_slice().try_into().map_err(|_| {
            VaultError::Storage(format!(
                "invalid salt length in database: expected {}, got {}",
                SALT_LEN,
                salt_bytes.len()
            ))
        })?;

        Ok(Some(SecretRecord::new(ciphertext, salt)))
    }

    fn backend_name(&self) -> &'static str {
        "Database Storage"
    }
}
