//! Core domain logic for the wiki encyclopedia.
//! This crate is the single source of truth for entry storage and lookup rules.

pub mod db;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogDestination};
pub use markdown::render_markdown;
pub use model::entry::{
    title_key, validate_title, Entry, EntryValidationError, MAX_TITLE_BYTES, MAX_TITLE_CHARS,
};
pub use model::section::SectionTable;
pub use search::resolver::{resolve, Resolution};
pub use service::entry_service::{EntryDraft, EntryService, EntryServiceError};
pub use store::file_store::FileEntryStore;
pub use store::sqlite_store::SqliteEntryStore;
pub use store::{EntryStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
