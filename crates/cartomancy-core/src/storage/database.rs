//! SQLite-backed key-value store.
//!
//! Every record the app persists (daily cards, streak, journal, planetary
//! progress) lives as a JSON string in the single `kv` table.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection};

use super::{data_dir_path, migrations, KeyValueStore};
use crate::error::StoreError;

/// SQLite database for app state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/cartomancy.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_in(&data_dir_path())
    }

    /// Open `cartomancy.db` inside `dir`, creating the directory first.
    pub fn open_in(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::DataDirUnavailable {
            path: dir.to_path_buf(),
            source,
        })?;
        Self::open_at(dir.join("cartomancy.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        migrations::migrate(&conn).map_err(|e| StoreError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// All keys currently stored, sorted.
    pub fn kv_keys(&self) -> Result<Vec<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect()
    }
}

impl KeyValueStore for Database {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.kv_get(key).map_err(|e| match StoreError::from(e) {
            StoreError::ReadFailed { message, .. } => StoreError::ReadFailed {
                key: key.to_string(),
                message,
            },
            other => other,
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.kv_set(key, value).map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}
