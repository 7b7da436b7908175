use std::sync::Arc;

use log::info;
use wiki_core::{EntryService, EntryStore, FileEntryStore, SectionTable, SqliteEntryStore};

use crate::{
    config::{Config, StoreBackend},
    error::AppError,
    templates::Templates,
};

pub type SharedStore = Arc<dyn EntryStore + Send + Sync>;

pub struct AppState {
    pub store: SharedStore,
    pub templates: Templates,
    pub sections: SectionTable,
}

impl AppState {
    pub fn new(store: SharedStore, sections: SectionTable) -> Result<Arc<Self>, AppError> {
        Ok(Arc::new(Self {
            store,
            templates: Templates::new()?,
            sections,
        }))
    }

    /// Opens the configured store backend and loads the section table.
    pub fn from_config(config: &Config) -> Result<Arc<Self>, AppError> {
        let store: SharedStore = match config.store {
            StoreBackend::Files => Arc::new(FileEntryStore::open(&config.entries_dir)?),
            StoreBackend::Sqlite => Arc::new(SqliteEntryStore::open(&config.db_path)?),
        };
        let sections = config.load_sections()?;
        info!(
            "event=state_init module=server status=ok store={} sections={}",
            config.store,
            sections.len()
        );
        Self::new(store, sections)
    }

    /// Runs a service call on the blocking pool; stores do synchronous I/O.
    pub async fn with_service<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(EntryService<SharedStore>) -> T + Send + 'static,
    {
        let service = EntryService::new(Arc::clone(&self.store));
        Ok(tokio::task::spawn_blocking(move || f(service)).await?)
    }
}
