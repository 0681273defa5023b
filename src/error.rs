use crate::i18n::{LoadError, LocaleError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Errors surfaced by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to serialize translations: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to generate sitemap: {0}")]
    Sitemap(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Locale(_) => StatusCode::BAD_REQUEST,
            AppError::Load(_)
            | AppError::Render(_)
            | AppError::Serialize(_)
            | AppError::Sitemap(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
