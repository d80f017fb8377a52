//! SQLite-backed local storage, used as the secondary mirror

use crate::core::Result;
use crate::storage::{SetOptions, StorageMedium};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Plain key-value store with no expiry
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    /// Open (or create) the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        let storage = Self { conn };
        storage.init_schema()?;

        Ok(storage)
    }

    /// Transient store that disappears with the process
    pub fn in_memory() -> Result<Self> {
        let storage = Self {
            conn: Connection::open_in_memory()?,
        };
        storage.init_schema()?;
        Ok(storage)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl StorageMedium for LocalStorage {
    fn name(&self) -> &str {
        "local-storage"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM key_value WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str, _options: &SetOptions) -> Result<()> {
        self.conn.execute(
            r#"INSERT INTO key_value (key, value, updated_at) VALUES (?1, ?2, ?3)
               ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = excluded.updated_at"#,
            params![key, value, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM key_value WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_overwrite() {
        let mut storage = LocalStorage::in_memory().unwrap();
        assert_eq!(storage.get("rabwa-language-backup").unwrap(), None);

        storage.set("rabwa-language-backup", "ar", &SetOptions::default()).unwrap();
        storage.set("rabwa-language-backup", "en", &SetOptions::default()).unwrap();
        assert_eq!(storage.get("rabwa-language-backup").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_persists_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.db");

        {
            let mut storage = LocalStorage::open(&path).unwrap();
            storage.set("k", "v", &SetOptions::default()).unwrap();
        }

        let storage = LocalStorage::open(&path).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let mut storage = LocalStorage::in_memory().unwrap();
        storage.remove("missing").unwrap();
    }
}
