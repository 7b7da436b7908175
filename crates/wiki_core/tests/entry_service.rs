use std::sync::Arc;
use wiki_core::{
    EntryDraft, EntryService, EntryServiceError, EntryStore, EntryValidationError,
    FileEntryStore, Resolution, SqliteEntryStore, MAX_TITLE_BYTES,
};

fn seeded_service() -> (tempfile::TempDir, EntryService<FileEntryStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileEntryStore::open(dir.path()).unwrap();
    for (title, content) in [
        ("Python", "# Python\n\nA language."),
        ("Django", "# Django\n\nA framework."),
        ("HTML", "# HTML\n\nMarkup."),
        ("CSS", "# CSS\n\nStyles."),
    ] {
        store.save_entry(title, content).unwrap();
    }
    (dir, EntryService::new(store))
}

#[test]
fn search_exact_match_redirects_to_canonical_title() {
    let (_dir, service) = seeded_service();
    assert_eq!(
        service.search("python").unwrap(),
        Resolution::ExactMatch("Python".to_string())
    );
}

#[test]
fn search_partial_query_lists_substring_matches() {
    let (_dir, service) = seeded_service();
    assert_eq!(
        service.search("py").unwrap(),
        Resolution::ResultList(vec!["Python".to_string()])
    );
    assert_eq!(
        service.search("SS").unwrap(),
        Resolution::ResultList(vec!["CSS".to_string()])
    );
    assert_eq!(
        service.search("t").unwrap(),
        Resolution::ResultList(vec!["HTML".to_string(), "Python".to_string()])
    );
}

#[test]
fn view_missing_entry_is_not_found() {
    let (_dir, service) = seeded_service();
    match service.view_entry("Rust") {
        Err(EntryServiceError::NotFound(title)) => assert_eq!(title, "Rust"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn create_new_entry_is_saved_and_viewable() {
    let (_dir, service) = seeded_service();
    let created = service
        .create_entry(EntryDraft::new("  Git ", "# Git"))
        .unwrap();
    assert_eq!(created.title, "Git");
    assert_eq!(created.content, "# Git");
    assert_eq!(service.view_entry("git").unwrap().content, "# Git");
}

#[test]
fn create_duplicate_title_in_any_case_is_rejected_with_draft() {
    let (_dir, service) = seeded_service();
    let draft = EntryDraft::new("css", "replacement body");

    let err = service.create_entry(draft.clone()).unwrap_err();
    match &err {
        EntryServiceError::DuplicateTitle(echoed) => assert_eq!(echoed, &draft),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.draft(), Some(&draft));
    assert_eq!(service.view_entry("CSS").unwrap().content, "# CSS\n\nStyles.");
}

#[test]
fn create_with_invalid_title_echoes_draft() {
    let (_dir, service) = seeded_service();
    let draft = EntryDraft::new("a/b", "body");
    let err = service.create_entry(draft.clone()).unwrap_err();
    assert!(matches!(err, EntryServiceError::InvalidTitle { .. }));
    assert_eq!(err.draft(), Some(&draft));
}

#[test]
fn create_with_multibyte_title_over_byte_budget_is_invalid_not_storage_failure() {
    let (_dir, service) = seeded_service();
    let draft = EntryDraft::new("文".repeat(100), "body");
    let err = service.create_entry(draft.clone()).unwrap_err();
    assert!(matches!(
        err,
        EntryServiceError::InvalidTitle {
            reason: EntryValidationError::TitleTooLong { .. },
            ..
        }
    ));
    assert_eq!(err.draft(), Some(&draft));

    let fits = "文".repeat(MAX_TITLE_BYTES / 3);
    let created = service
        .create_entry(EntryDraft::new(fits.clone(), "body"))
        .unwrap();
    assert_eq!(created.title, fits);
}

#[test]
fn edit_overwrites_existing_entry() {
    let (_dir, service) = seeded_service();
    let edited = service.edit_entry("django", "# Django\n\nUpdated.").unwrap();
    assert_eq!(edited.title, "Django");
    assert_eq!(
        service.view_entry("Django").unwrap().content,
        "# Django\n\nUpdated."
    );
    assert_eq!(service.list_entries().unwrap().len(), 4);
}

#[test]
fn edit_missing_entry_is_not_found_and_creates_nothing() {
    let (_dir, service) = seeded_service();
    let err = service.edit_entry("Nonexistent", "body").unwrap_err();
    assert!(matches!(err, EntryServiceError::NotFound(ref title) if title == "Nonexistent"));
    assert!(!service
        .list_entries()
        .unwrap()
        .contains(&"Nonexistent".to_string()));
}

#[test]
fn edit_form_prefills_current_content() {
    let (_dir, service) = seeded_service();
    let entry = service.edit_form("html").unwrap();
    assert_eq!(entry.title, "HTML");
    assert_eq!(entry.content, "# HTML\n\nMarkup.");
}

#[test]
fn service_runs_over_shared_sqlite_store() {
    let store: Arc<dyn EntryStore + Send + Sync> =
        Arc::new(SqliteEntryStore::open_in_memory().unwrap());
    let service = EntryService::new(store.clone());

    service
        .create_entry(EntryDraft::new("Rust", "# Rust"))
        .unwrap();
    assert_eq!(store.get_entry("RUST").unwrap().as_deref(), Some("# Rust"));
    assert!(matches!(
        service.create_entry(EntryDraft::new("rust", "again")),
        Err(EntryServiceError::DuplicateTitle(_))
    ));
}
