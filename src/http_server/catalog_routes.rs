//! Reference data for building the input form

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use serde::Serialize;

use crate::auth::Role;
use crate::catalog::{fields::bounds, mappings, FieldOptions, Preset};
use crate::preprocessing::RawRecord;

use super::errors::{authorize, ApiError};
use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct MappingsResponse {
    pub fields: Vec<FieldOptions>,
    pub bounds: FormBounds,
}

/// Input ranges the form enforces
#[derive(Debug, Serialize)]
pub struct FormBounds {
    pub age: (i64, i64),
    pub grade: (i64, i64),
    pub qualification_grade: (i64, i64),
}

#[derive(Debug, Serialize)]
pub struct PresetResponse {
    pub name: &'static str,
    pub record: RawRecord,
}

/// Routes mounted under `/catalog`
pub fn catalog_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/mappings", get(mappings_handler))
        .route("/presets", get(presets_handler))
        .with_state(state)
}

async fn mappings_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MappingsResponse>, ApiError> {
    authorize(&state, &headers, Role::User)?;

    Ok(Json(MappingsResponse {
        fields: mappings::all_field_options(),
        bounds: FormBounds {
            age: (bounds::MIN_AGE, bounds::MAX_AGE),
            grade: (bounds::MIN_GRADE, bounds::MAX_GRADE),
            qualification_grade: (bounds::MIN_QUALIFICATION_GRADE, bounds::MAX_QUALIFICATION_GRADE),
        },
    }))
}

async fn presets_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<PresetResponse>>, ApiError> {
    authorize(&state, &headers, Role::User)?;

    Ok(Json(
        Preset::ALL
            .iter()
            .map(|preset| PresetResponse {
                name: preset.name(),
                record: preset.record(),
            })
            .collect(),
    ))
}
