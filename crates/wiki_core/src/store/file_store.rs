//! Directory-backed entry store.
//!
//! # Responsibility
//! - Persist each entry as `{title}.md` inside one content directory.
//! - Keep a case-insensitive [`TitleIndex`] in sync with the directory.
//!
//! # Invariants
//! - Only regular `*.md` files with UTF-8 names are entries.
//! - The index is rebuilt on open, on listing and on a lookup miss (reads and
//!   saves alike), because the directory may be edited outside this process.

use crate::model::entry::{validate_title, Entry};
use crate::store::index::TitleIndex;
use crate::store::{EntryStore, StoreError, StoreResult};
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const ENTRY_EXTENSION: &str = "md";

/// Entry store over a directory of markdown files.
#[derive(Debug)]
pub struct FileEntryStore {
    root: PathBuf,
    index: RwLock<TitleIndex>,
}

impl FileEntryStore {
    /// Opens the content directory, creating it when missing.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| StoreError::io(&root, err))?;

        let index = scan_index(&root)?;
        info!(
            "event=store_open module=store status=ok backend=files entries={}",
            index.len()
        );
        Ok(Self {
            root,
            index: RwLock::new(index),
        })
    }

    /// Returns the content directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, title: &str) -> PathBuf {
        self.root.join(format!("{title}.{ENTRY_EXTENSION}"))
    }

    fn refresh_index(&self) -> StoreResult<TitleIndex> {
        let index = scan_index(&self.root)?;
        let mut guard = self
            .index
            .write()
            .map_err(|_| StoreError::LockPoisoned("title index"))?;
        *guard = index.clone();
        Ok(index)
    }

    fn lookup(&self, title: &str) -> StoreResult<Option<String>> {
        let guard = self
            .index
            .read()
            .map_err(|_| StoreError::LockPoisoned("title index"))?;
        Ok(guard.lookup(title).map(str::to_string))
    }

    fn read_entry(&self, canonical: &str) -> StoreResult<Option<Entry>> {
        let path = self.entry_path(canonical);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(Entry::new(canonical, content))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(path, err)),
        }
    }
}

impl EntryStore for FileEntryStore {
    fn list_entries(&self) -> StoreResult<Vec<String>> {
        Ok(self.refresh_index()?.titles())
    }

    fn find_entry(&self, title: &str) -> StoreResult<Option<Entry>> {
        if let Some(canonical) = self.lookup(title)? {
            if let Some(entry) = self.read_entry(&canonical)? {
                return Ok(Some(entry));
            }
            debug!("event=entry_read module=store status=stale backend=files");
        }

        match self.refresh_index()?.lookup(title) {
            Some(canonical) => self.read_entry(canonical),
            None => Ok(None),
        }
    }

    fn save_entry(&self, title: &str, content: &str) -> StoreResult<()> {
        let title = validate_title(title)?;
        let mut guard = self
            .index
            .write()
            .map_err(|_| StoreError::LockPoisoned("title index"))?;
        if guard.lookup(&title).is_none() {
            // Another casing may have been written to disk since the last scan.
            *guard = scan_index(&self.root)?;
        }
        let canonical = guard
            .lookup(&title)
            .map(str::to_string)
            .unwrap_or(title);

        let path = self.entry_path(&canonical);
        fs::write(&path, content).map_err(|err| StoreError::io(&path, err))?;
        guard.insert(canonical);

        debug!(
            "event=entry_save module=store status=ok backend=files content_bytes={}",
            content.len()
        );
        Ok(())
    }
}

fn scan_index(root: &Path) -> StoreResult<TitleIndex> {
    let read_dir = fs::read_dir(root).map_err(|err| StoreError::io(root, err))?;
    let mut titles = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|err| StoreError::io(root, err))?;
        let file_type = dir_entry
            .file_type()
            .map_err(|err| StoreError::io(dir_entry.path(), err))?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(title) = title_from_path(&dir_entry.path()) {
            titles.push(title);
        }
    }

    let (index, shadowed) = TitleIndex::build(titles);
    for title_chars in shadowed.iter().map(|title| title.chars().count()) {
        warn!(
            "event=store_scan module=store status=conflict backend=files reason=case_collision title_chars={title_chars}"
        );
    }
    Ok(index)
}

fn title_from_path(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != ENTRY_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}
