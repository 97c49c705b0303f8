//! Liveness check

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Width of the loaded feature schema
    pub model_features: usize,
    /// `None` if the session table is unreadable
    pub active_sessions: Option<usize>,
}

/// `/health`, no authentication
pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model_features: state.predictor.schema().len(),
        active_sessions: state.auth.sessions().active_count().ok(),
    })
}
