use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use thiserror::Error;
use wiki_core::StoreError;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Template setup error: {0}")]
    TemplateSetup(#[from] Box<handlebars::TemplateError>),

    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Inconsistent state: {0}")]
    Inconsistent(String),
}

impl From<handlebars::TemplateError> for AppError {
    fn from(err: handlebars::TemplateError) -> Self {
        AppError::TemplateSetup(Box::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("event=http_request module=server status=error error={self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
