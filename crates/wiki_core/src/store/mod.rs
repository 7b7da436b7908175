//! Entry storage contracts and backend implementations.
//!
//! # Responsibility
//! - Define the title-keyed persistence contract used by services.
//! - Isolate filesystem and SQLite details from use-case orchestration.
//!
//! # Invariants
//! - At most one entry is stored per case-insensitive title.
//! - Saving over an existing entry keeps the stored title casing.
//! - Absent entries are `Ok(None)`, never an error.
//! - No operation retries; storage faults propagate to the caller.
//!
//! Concurrent saves to one title are last-write-wins. Internal locks only
//! guard in-memory bookkeeping, not write ordering between requests.

use crate::db::DbError;
use crate::model::entry::{Entry, EntryValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;

pub mod file_store;
pub mod index;
pub mod sqlite_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error. Everything except `InvalidTitle` is a storage failure.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Db(DbError),
    InvalidTitle(EntryValidationError),
    /// A thread panicked while holding the named lock.
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns whether this is a storage fault rather than rejected input.
    pub fn is_storage_failure(&self) -> bool {
        !matches!(self, Self::InvalidTitle(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidTitle(err) => write!(f, "{err}"),
            Self::LockPoisoned(name) => write!(f, "{name} lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::InvalidTitle(err) => Some(err),
            Self::LockPoisoned(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::InvalidTitle(value)
    }
}

/// Title-keyed entry persistence.
pub trait EntryStore {
    /// Lists all canonical titles in ascending order.
    fn list_entries(&self) -> StoreResult<Vec<String>>;

    /// Finds one entry by case-insensitive title.
    fn find_entry(&self, title: &str) -> StoreResult<Option<Entry>>;

    /// Creates or unconditionally overwrites an entry.
    ///
    /// The content is fully persisted before this returns.
    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()>;

    /// Returns the content of one entry, matched case-insensitively.
    fn get_entry(&self, title: &str) -> StoreResult<Option<String>> {
        Ok(self.find_entry(title)?.map(|entry| entry.content))
    }
}

impl<S: EntryStore + ?Sized> EntryStore for Arc<S> {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        (**self).list_entries()
    }

    fn find_entry(&self, title: &str) -> StoreResult<Option<Entry>> {
        (**self).find_entry(title)
    }

    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()> {
        (**self).save_entry(title, content)
    }

    fn get_entry(&self, title: &str) -> StoreResult<Option<String>> {
        (**self).get_entry(title)
    }
}
