//! SQLite backend for the key-value contract.
//!
//! # Responsibility
//! - Open the board database file (or an in-memory one) and own its schema.
//! - Serve `get/set/remove` over the single `kv_entries` table.
//!
//! # Invariants
//! - A store only exists once the schema check has passed; no slot payload is
//!   read from a database whose `PRAGMA user_version` is newer than
//!   [`SCHEMA_VERSION`].
//! - A second process waits up to [`BUSY_TIMEOUT`] for the write lock.

use super::kv_store::{KeyValueStore, RepoError, RepoResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_KV_ENTRIES: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key-value store persisted in one SQLite table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens (creating when missing) a board database file.
    ///
    /// # Errors
    /// - `RepoError::UnsupportedSchemaVersion` when the file was written by a
    ///   newer build.
    /// - `RepoError::Sqlite` when the file cannot be opened or bootstrapped.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn open_with<F>(mode: &str, open: F) -> RepoResult<Self>
    where
        F: FnOnce() -> rusqlite::Result<Connection>,
    {
        let started_at = Instant::now();
        let result = open()
            .map_err(RepoError::from)
            .and_then(|mut conn| ensure_schema(&mut conn).map(|()| conn));
        match result {
            Ok(conn) => {
                info!(
                    "event=store_open module=repo status=ok mode={} schema_version={} duration_ms={}",
                    mode,
                    SCHEMA_VERSION,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=store_open module=repo status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn ensure_schema(conn: &mut Connection) -> RepoResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if found > SCHEMA_VERSION {
        return Err(RepoError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_KV_ENTRIES)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    info!("event=store_schema module=repo status=ok from_version={found} to_version={SCHEMA_VERSION}");
    Ok(())
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SqliteKeyValueStore, SCHEMA_VERSION};
    use crate::repo::kv_store::KeyValueStore;

    #[test]
    fn in_memory_store_is_bootstrapped() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();
        let version: u32 = store
            .connection()
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
