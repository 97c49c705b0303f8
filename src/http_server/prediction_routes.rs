//! Prediction, validation, export and model info routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::auth::{AuthError, LastPrediction, Role};
use crate::export::{file_name, ExportReport};
use crate::model::{assess, Assessment, ModelInfo};
use crate::observability::{log_event_with_fields, Event};
use crate::preprocessing::RawRecord;

use super::errors::{authorize, bearer_token, reject, ApiError};
use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub warnings: Vec<String>,
}

/// Routes for `/predict*` and `/model/info`, with full paths
pub fn prediction_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(predict_handler))
        .route("/predict/validate", post(validate_handler))
        .route("/predict/export", get(export_handler))
        .route("/model/info", get(model_info_handler))
        .with_state(state)
}

async fn predict_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<RawRecord>, JsonRejection>,
) -> Result<Json<Assessment>, ApiError> {
    authorize(&state, &headers, Role::User)?;
    let Json(record) = payload.map_err(reject)?;

    let (assessment, result) =
        assess(&state.predictor, &state.validator, &record).map_err(reject)?;

    // authorize() succeeded, so the token is present
    let token = bearer_token(&headers).ok_or_else(|| reject(AuthError::AuthenticationRequired))?;
    state
        .auth
        .record_prediction(
            token,
            LastPrediction {
                record,
                result,
                predicted_at: Utc::now(),
            },
        )
        .map_err(reject)?;

    Ok(Json(assessment))
}

async fn validate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<RawRecord>, JsonRejection>,
) -> Result<Json<ValidateResponse>, ApiError> {
    authorize(&state, &headers, Role::User)?;
    let Json(record) = payload.map_err(reject)?;

    let warnings = state.validator.validate(&record);
    Ok(Json(ValidateResponse {
        valid: warnings.is_empty(),
        warnings,
    }))
}

async fn export_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let session = authorize(&state, &headers, Role::Educator)?;

    let now = Utc::now();
    let report = ExportReport::from_last(session.last_prediction.as_ref(), now).map_err(reject)?;
    let body = report.to_json().map_err(reject)?;
    let name = file_name(now);

    log_event_with_fields(
        Event::ReportExported,
        &[
            ("file", name.as_str()),
            ("username", session.username.as_str()),
        ],
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        body,
    ))
}

async fn model_info_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ModelInfo>, ApiError> {
    authorize(&state, &headers, Role::User)?;
    Ok(Json(ModelInfo::new(state.predictor.schema().len())))
}
