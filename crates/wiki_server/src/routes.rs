//! HTTP handlers for the encyclopedia pages.
//!
//! Not-found outcomes answer 404 with a readable page; rejected submissions
//! re-display their form with the submitted fields; store faults become 500.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use wiki_core::{render_markdown, EntryDraft, EntryServiceError, Resolution};

use crate::{
    error::AppError,
    state::AppState,
    templates::{EntryLink, EntryPage, FormPage, IndexPage, MessagePage, SearchPage},
};

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewEntryForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditEntryForm {
    #[serde(default)]
    pub content: String,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let titles = state.with_service(|service| service.list_entries()).await??;
    let page = IndexPage {
        page_title: "Encyclopedia".to_string(),
        entries: links(titles),
    };
    Ok(Html(state.templates.render("index", &page)?))
}

pub async fn entry(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Response, AppError> {
    let found = state
        .with_service(move |service| service.view_entry(&title))
        .await?;
    match found {
        Ok(entry) => {
            let page = EntryPage {
                page_title: entry.title.clone(),
                html: render_markdown(&entry.content),
                edit_href: edit_href(&entry.title),
                title: entry.title,
            };
            Ok(Html(state.templates.render("entry", &page)?).into_response())
        }
        Err(err) => failure_response(&state, err),
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let query = params.q;
    let lookup = query.clone();
    let resolution = state
        .with_service(move |service| service.search(&lookup))
        .await??;
    match resolution {
        Resolution::ExactMatch(title) => Ok(Redirect::to(&entry_href(&title)).into_response()),
        Resolution::ResultList(titles) => {
            let page = SearchPage {
                page_title: "Search Results".to_string(),
                query,
                entries: links(titles),
            };
            Ok(Html(state.templates.render("search", &page)?).into_response())
        }
    }
}

pub async fn new_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let page = new_page(EntryDraft::default(), None);
    Ok(Html(state.templates.render("new", &page)?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewEntryForm>,
) -> Result<Response, AppError> {
    let draft = EntryDraft::new(form.title, form.content);
    let created = state
        .with_service(move |service| service.create_entry(draft))
        .await?;
    match created {
        Ok(entry) => Ok(Redirect::to(&entry_href(&entry.title)).into_response()),
        Err(err) => failure_response(&state, err),
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Response, AppError> {
    let found = state
        .with_service(move |service| service.edit_form(&title))
        .await?;
    match found {
        Ok(entry) => {
            let page = FormPage {
                page_title: format!("Edit {}", entry.title),
                action: edit_href(&entry.title),
                title: entry.title,
                content: entry.content,
                error: None,
            };
            Ok(Html(state.templates.render("edit", &page)?).into_response())
        }
        Err(err) => failure_response(&state, err),
    }
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    Form(form): Form<EditEntryForm>,
) -> Result<Response, AppError> {
    let edited = state
        .with_service(move |service| service.edit_entry(&title, &form.content))
        .await?;
    match edited {
        Ok(entry) => Ok(Redirect::to(&entry_href(&entry.title)).into_response()),
        Err(err) => failure_response(&state, err),
    }
}

pub async fn section(State(state): State<Arc<AppState>>, Path(num): Path<usize>) -> Response {
    match state.sections.get(num) {
        Some(text) => text.to_string().into_response(),
        None => {
            debug!("event=section_lookup module=server status=not_found");
            (StatusCode::NOT_FOUND, "No such section").into_response()
        }
    }
}

/// Maps a rejected service call to its user-visible response.
fn failure_response(state: &AppState, err: EntryServiceError) -> Result<Response, AppError> {
    match err {
        EntryServiceError::NotFound(_) => {
            let page = MessagePage {
                page_title: "Page Not Found".to_string(),
                message: err.to_string(),
            };
            let body = state.templates.render("message", &page)?;
            Ok((StatusCode::NOT_FOUND, Html(body)).into_response())
        }
        EntryServiceError::DuplicateTitle(_) | EntryServiceError::InvalidTitle { .. } => {
            let message = err.to_string();
            let draft = err.draft().cloned().unwrap_or_default();
            let page = new_page(draft, Some(message));
            Ok(Html(state.templates.render("new", &page)?).into_response())
        }
        EntryServiceError::Store(err) => Err(AppError::Store(err)),
        EntryServiceError::InconsistentState(details) => {
            Err(AppError::Inconsistent(details.to_string()))
        }
    }
}

fn new_page(draft: EntryDraft, error: Option<String>) -> FormPage {
    FormPage {
        page_title: "Create New Page".to_string(),
        action: "/new".to_string(),
        title: draft.title,
        content: draft.content,
        error,
    }
}

fn links(titles: Vec<String>) -> Vec<EntryLink> {
    titles
        .into_iter()
        .map(|title| EntryLink {
            href: entry_href(&title),
            title,
        })
        .collect()
}

pub fn entry_href(title: &str) -> String {
    format!("/wiki/{}", encode_path_segment(title))
}

pub fn edit_href(title: &str) -> String {
    format!("{}/edit", entry_href(title))
}

/// Percent-encodes every byte outside the RFC 3986 unreserved set.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
