//! Account management routes, admin only

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get},
    Router,
};

use crate::auth::{AccountSummary, NewAccountRequest, Role};

use super::errors::{authorize, reject, run_blocking, ApiError};
use super::state::AppState;

/// Routes mounted under `/admin`
pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/:username", delete(delete_user_handler))
        .with_state(state)
}

async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<AccountSummary>>, ApiError> {
    let actor = authorize(&state, &headers, Role::Admin)?;
    state.auth.list_accounts(&actor).map(Json).map_err(reject)
}

async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<NewAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountSummary>), ApiError> {
    let actor = authorize(&state, &headers, Role::Admin)?;
    let Json(request) = payload.map_err(reject)?;

    let created =
        run_blocking(move || state.auth.add_account(&actor, &request).map_err(reject)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    let actor = authorize(&state, &headers, Role::Admin)?;
    state
        .auth
        .delete_account(&actor, &username)
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}
