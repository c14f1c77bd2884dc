//! SQLite-backed store.
//!
//! The database lives at `<base>/etc/config.db`, derived from an externally
//! supplied base directory. Writes are committed as they happen, so a batch
//! that fails midway leaves its earlier writes persisted (last writer wins,
//! no rollback).

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{ConfigError, Result};
use crate::store::ConfigStore;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if necessary) the store under `base_dir`.
    ///
    /// `base_dir` itself must exist; the `etc/` subdirectory is created on
    /// demand.
    pub fn open(base_dir: &Path) -> Result<Self> {
        if !base_dir.is_dir() {
            return Err(ConfigError::MissingBaseDir(base_dir.to_path_buf()));
        }
        let db_path = store_path(base_dir);
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;

            CREATE TABLE IF NOT EXISTS config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self { conn })
    }
}

/// Database location for a given base directory.
pub fn store_path(base_dir: &Path) -> PathBuf {
    base_dir.join("etc").join("config.db")
}

impl ConfigStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM config WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM config ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    fn remove_all(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM config", [])?;
        Ok(())
    }

    fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| ConfigError::Store(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_requires_existing_base_dir() {
        let tmp = TempDir::new().expect("tmp");
        let missing = tmp.path().join("nope");
        let err = SqliteStore::open(&missing).expect_err("open");
        assert!(matches!(err, ConfigError::MissingBaseDir(_)));
    }

    #[test]
    fn test_set_get_roundtrip() {
        let tmp = TempDir::new().expect("tmp");
        let mut store = SqliteStore::open(tmp.path()).expect("open");

        assert_eq!(store.get("a.key").expect("get"), None);
        store.set("a.key", "value").expect("set");
        store.set("a.key", "newer").expect("set");
        assert_eq!(store.get("a.key").expect("get").as_deref(), Some("newer"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let tmp = TempDir::new().expect("tmp");
        {
            let mut store = SqliteStore::open(tmp.path()).expect("open");
            store.set("persist.me", "yes").expect("set");
            store.close().expect("close");
        }

        let store = SqliteStore::open(tmp.path()).expect("reopen");
        assert_eq!(store.get("persist.me").expect("get").as_deref(), Some("yes"));
    }

    #[test]
    fn test_keys_sorted_and_remove_all() {
        let tmp = TempDir::new().expect("tmp");
        let mut store = SqliteStore::open(tmp.path()).expect("open");
        store.set("b", "2").expect("set");
        store.set("a", "1").expect("set");

        assert_eq!(store.keys().expect("keys"), vec!["a".to_string(), "b".to_string()]);

        store.remove_all().expect("remove");
        assert!(store.keys().expect("keys").is_empty());
    }
}
