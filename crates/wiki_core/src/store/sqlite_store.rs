//! SQLite-backed entry store.
//!
//! # Responsibility
//! - Persist entries as rows of the `entries` table.
//! - Resolve case-insensitive titles through the `title_key` column.
//!
//! # Invariants
//! - `title_key` is always `title_key(title)` computed in Rust.
//! - Upserts never rewrite the stored `title`.

use crate::db::{open_db, open_db_in_memory};
use crate::model::entry::{title_key, validate_title, Entry};
use crate::store::{EntryStore, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Entry store over one SQLite connection.
#[derive(Debug)]
pub struct SqliteEntryStore {
    conn: Mutex<Connection>,
}

impl SqliteEntryStore {
    /// Opens the database file, applying migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already has migrations applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::LockPoisoned("sqlite connection"))
    }
}

impl EntryStore for SqliteEntryStore {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT title FROM entries ORDER BY title ASC;")?;
        let mut rows = stmt.query([])?;
        let mut titles = Vec::new();
        while let Some(row) = rows.next()? {
            titles.push(row.get("title")?);
        }
        Ok(titles)
    }

    fn find_entry(&self, title: &str) -> StoreResult<Option<Entry>> {
        let conn = self.conn()?;
        let entry = conn
            .query_row(
                "SELECT title, content FROM entries WHERE title_key = ?1;",
                [title_key(title)],
                |row| Ok(Entry::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(entry)
    }

    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()> {
        let title = validate_title(title)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO entries (title_key, title, content)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(title_key) DO UPDATE SET
                content = excluded.content,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![title_key(&title), title, content],
        )?;

        debug!(
            "event=entry_save module=store status=ok backend=sqlite content_bytes={}",
            content.len()
        );
        Ok(())
    }
}
