//! Entry use-case service.
//!
//! # Responsibility
//! - Provide list/view/search/create/edit APIs over any [`EntryStore`].
//! - Turn storage outcomes into the user-facing error taxonomy.
//!
//! # Invariants
//! - Create never overwrites: an existing title in any casing is rejected.
//! - Edit never creates: a missing title is reported as not found.
//! - Rejected submissions carry the submitted fields back to the caller.

use crate::model::entry::{validate_title, Entry, EntryValidationError};
use crate::search::resolver::{resolve, Resolution};
use crate::store::{EntryStore, StoreError, StoreResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-submitted entry fields, echoed back when a submission is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Service error for entry use-cases.
#[derive(Debug)]
pub enum EntryServiceError {
    /// No entry matches the requested title.
    NotFound(String),
    /// Create target already exists under some casing.
    DuplicateTitle(EntryDraft),
    /// Submitted title cannot be stored.
    InvalidTitle {
        draft: EntryDraft,
        reason: EntryValidationError,
    },
    /// Persistence-layer failure.
    Store(StoreError),
    /// Write succeeded but the read-back disagrees.
    InconsistentState(&'static str),
}

impl EntryServiceError {
    /// Returns the submitted fields for form re-display, if any.
    pub fn draft(&self) -> Option<&EntryDraft> {
        match self {
            Self::DuplicateTitle(draft) | Self::InvalidTitle { draft, .. } => Some(draft),
            _ => None,
        }
    }
}

impl Display for EntryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(title) => write!(f, "Page '{title}' not found"),
            Self::DuplicateTitle(draft) => {
                write!(f, "An entry titled '{}' already exists", draft.title.trim())
            }
            Self::InvalidTitle { reason, .. } => write!(f, "Invalid title: {reason}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent entry state: {details}"),
        }
    }
}

impl Error for EntryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTitle { reason, .. } => Some(reason),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for EntryServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Entry service facade over store implementations.
pub struct EntryService<S: EntryStore> {
    store: S,
}

impl<S: EntryStore> EntryService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every entry title.
    pub fn list_entries(&self) -> StoreResult<Vec<String>> {
        self.store.list_entries()
    }

    /// Loads one entry for display.
    pub fn view_entry(&self, title: &str) -> Result<Entry, EntryServiceError> {
        self.store
            .find_entry(title)?
            .ok_or_else(|| EntryServiceError::NotFound(title.to_string()))
    }

    /// Loads one entry to prefill the edit form.
    pub fn edit_form(&self, title: &str) -> Result<Entry, EntryServiceError> {
        self.view_entry(title)
    }

    /// Resolves a query against all stored titles.
    pub fn search(&self, query: &str) -> StoreResult<Resolution> {
        let titles = self.store.list_entries()?;
        let resolution = resolve(query, &titles);
        info!(
            "event=entry_search module=service status=ok exact={} hits={}",
            resolution.redirect_target().is_some(),
            match &resolution {
                Resolution::ExactMatch(_) => 1,
                Resolution::ResultList(hits) => hits.len(),
            }
        );
        Ok(resolution)
    }

    /// Creates a new entry, rejecting titles that already exist.
    pub fn create_entry(&self, draft: EntryDraft) -> Result<Entry, EntryServiceError> {
        let title = match validate_title(&draft.title) {
            Ok(title) => title,
            Err(reason) => {
                warn!("event=entry_create module=service status=rejected reason=invalid_title");
                return Err(EntryServiceError::InvalidTitle { draft, reason });
            }
        };

        if self.store.get_entry(&title)?.is_some() {
            warn!("event=entry_create module=service status=rejected reason=duplicate_title");
            return Err(EntryServiceError::DuplicateTitle(draft));
        }

        self.store.save_entry(&title, &draft.content)?;
        info!(
            "event=entry_create module=service status=ok content_bytes={}",
            draft.content.len()
        );
        self.read_back(&title, "created entry not found in read-back")
    }

    /// Overwrites the content of an existing entry.
    pub fn edit_entry(&self, title: &str, content: &str) -> Result<Entry, EntryServiceError> {
        let existing = match self.store.find_entry(title)? {
            Some(entry) => entry,
            None => {
                warn!("event=entry_edit module=service status=rejected reason=not_found");
                return Err(EntryServiceError::NotFound(title.to_string()));
            }
        };

        self.store.save_entry(&existing.title, content)?;
        info!(
            "event=entry_edit module=service status=ok content_bytes={}",
            content.len()
        );
        self.read_back(&existing.title, "edited entry not found in read-back")
    }

    fn read_back(&self, title: &str, details: &'static str) -> Result<Entry, EntryServiceError> {
        self.store
            .find_entry(title)?
            .ok_or(EntryServiceError::InconsistentState(details))
    }
}
