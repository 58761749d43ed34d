//! Mapping from service outcomes to HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error};
use recipes_core::RecipeServiceError;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

/// Error returned by every recipe handler.
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be decoded.
    BadRequest(String),
    /// No route matches the method and path.
    RouteNotFound(String),
    Service(RecipeServiceError),
    /// Handler task panicked or was cancelled before responding.
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::RouteNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Service(RecipeServiceError::InvalidRecipe(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_recipe")
            }
            Self::Service(RecipeServiceError::RecipeNotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            Self::Service(RecipeServiceError::DuplicateRecipe(_)) => {
                (StatusCode::CONFLICT, "already_exists")
            }
            Self::Service(RecipeServiceError::Store(_)) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "malformed request body: {message}"),
            Self::RouteNotFound(path) => write!(f, "no route for {path}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecipeServiceError> for ApiError {
    fn from(value: RecipeServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::BadRequest(value.to_string())
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        // Panic payloads may carry request data; keep them out of the body.
        if value.is_panic() {
            Self::Internal("request handler panicked".to_string())
        } else {
            Self::Internal("request handler was cancelled".to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!("event=http_request module=http status=error code={code} error={message}");
        } else {
            debug!("event=http_request module=http status=rejected code={code} error={message}");
        }

        let body = serde_json::json!({
            "error": code,
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
