//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical titled document stored by every backend.
//! - Own title normalization shared by storage lookup and search.
//!
//! # Invariants
//! - Titles keep their original casing; lookups go through [`title_key`].
//! - A persisted title always passes [`validate_title`].

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound on title length, counted in chars.
pub const MAX_TITLE_CHARS: usize = 200;

/// Upper bound on title length in UTF-8 bytes; `{title}.md` must fit in a
/// 255-byte file name.
pub const MAX_TITLE_BYTES: usize = 240;

/// Titled markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Title with its stored casing.
    pub title: String,
    /// Raw markdown body.
    pub content: String,
}

impl Entry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Rejection reasons for user-supplied titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTitle,
    TitleTooLong { chars: usize, bytes: usize },
    /// Title contains a char that cannot appear in a storage key.
    ForbiddenChar(char),
    ReservedTitle(String),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::TitleTooLong { chars, bytes } => write!(
                f,
                "title is too long ({chars} characters, {bytes} bytes); the limit is {MAX_TITLE_CHARS} characters or {MAX_TITLE_BYTES} bytes"
            ),
            Self::ForbiddenChar(ch) if ch.is_control() => {
                write!(f, "title cannot contain control characters")
            }
            Self::ForbiddenChar(ch) => write!(f, "title cannot contain `{ch}`"),
            Self::ReservedTitle(title) => write!(f, "`{title}` is a reserved title"),
        }
    }
}

impl Error for EntryValidationError {}

/// Returns the case-insensitive lookup key for a title.
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// Validates a user-supplied title and returns it trimmed.
///
/// # Errors
/// - Blank input, over-long input, path separators, control chars and the
///   `.`/`..` names are rejected.
pub fn validate_title(raw: &str) -> Result<String, EntryValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(EntryValidationError::EmptyTitle);
    }

    let chars = title.chars().count();
    let bytes = title.len();
    if chars > MAX_TITLE_CHARS || bytes > MAX_TITLE_BYTES {
        return Err(EntryValidationError::TitleTooLong { chars, bytes });
    }

    if let Some(ch) = title
        .chars()
        .find(|ch| matches!(ch, '/' | '\\') || ch.is_control())
    {
        return Err(EntryValidationError::ForbiddenChar(ch));
    }

    if title == "." || title == ".." {
        return Err(EntryValidationError::ReservedTitle(title.to_string()));
    }

    Ok(title.to_string())
}
