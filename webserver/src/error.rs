//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use shared::{Component, SharedError, logging};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Store lock poisoned")]
    StorePoisoned,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::NotFound => StatusCode::NOT_FOUND,
            WebServerError::InvalidRequest(_) | WebServerError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            logging::log_error(Component::Server, "Request", &self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WebServerError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            WebServerError::from(SharedError::NameRequired).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(WebServerError::invalid("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(WebServerError::StorePoisoned.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let error = WebServerError::from(SharedError::NameRequired);
        assert_eq!(error.to_string(), "name required");
    }
}
