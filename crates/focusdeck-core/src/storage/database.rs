//! SQLite-backed key-value persistence.
//!
//! One `kv` table holds everything the process persists: the statistics
//! record, the serialized countdown engine, and the calculation history.
//! Writes are wholesale `INSERT OR REPLACE`, so repeated writes of the
//! same value are idempotent.

use rusqlite::{params, Connection};

use crate::error::StoreError;
use crate::stats::StatsStore;

use super::data_dir;

/// SQLite database holding the key-value store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `data_dir()/focusdeck.db`.
    ///
    /// Creates the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .join("focusdeck.db");
        let conn =
            Connection::open(&path).map_err(|source| StoreError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
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
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl StatsStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.kv_get(key)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.kv_set(key, value)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn repeated_writes_are_idempotent() {
        let db = Database::open_memory().unwrap();
        db.kv_set("k", "v").unwrap();
        db.kv_set("k", "v").unwrap();
        db.kv_set("k", "v2").unwrap();
        assert_eq!(db.kv_get("k").unwrap().unwrap(), "v2");
    }

    #[test]
    fn implements_stats_store() {
        let db = Database::open_memory().unwrap();
        StatsStore::set(&db, "stats", "{}").unwrap();
        assert_eq!(StatsStore::get(&db, "stats").unwrap().unwrap(), "{}");
    }
}
