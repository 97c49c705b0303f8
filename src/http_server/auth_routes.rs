//! Auth HTTP Routes
//!
//! Login, logout and session inspection.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};

use crate::auth::{AuthError, LoginRequest, LoginResponse, SessionInfo};

use super::errors::{bearer_token, reject, run_blocking, ApiError};
use super::state::AppState;

/// Routes mounted under `/auth`
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/session", get(session_handler))
        .with_state(state)
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(reject)?;
    run_blocking(move || state.auth.login(&request).map(Json).map_err(reject)).await
}

async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers).ok_or_else(|| reject(AuthError::AuthenticationRequired))?;
    state.auth.logout(token).map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SessionInfo>, ApiError> {
    let session = state.auth.resolve(bearer_token(&headers)).map_err(reject)?;
    let timeout = state.auth.sessions().config().idle_timeout;
    Ok(Json(session.info(timeout)))
}
