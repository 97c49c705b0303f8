//! Error bodies and request guards shared by all routes

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;

use crate::auth::{AuthError, Role, Session};
use crate::export::ExportError;
use crate::model::ModelError;
use crate::observability::{log_event_with_fields, Event};

use super::state::AppState;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Rejection returned by handlers
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }

    pub fn into_rejection(self) -> ApiError {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self))
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}

impl From<ModelError> for ErrorResponse {
    fn from(err: ModelError) -> Self {
        log_event_with_fields(Event::PredictionFailed, &[("error", err.to_string().as_str())]);
        Self::new(err.status_code(), err.to_string())
    }
}

impl From<ExportError> for ErrorResponse {
    fn from(err: ExportError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(400, format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Converts any domain error into a handler rejection
pub fn reject(err: impl Into<ErrorResponse>) -> ApiError {
    err.into().into_rejection()
}

/// Runs password hashing or verification on the blocking pool
pub async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        ErrorResponse::new(500, format!("Background task failed: {}", e)).into_rejection()
    })?
}

/// Raw bearer token from the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Guard clause: resolve the session, then check its role
///
/// 401 without a live session, 403 with one that ranks too low.
pub fn authorize(state: &AppState, headers: &HeaderMap, required: Role) -> Result<Session, ApiError> {
    state
        .auth
        .require(bearer_token(headers), required)
        .map_err(reject)
}
