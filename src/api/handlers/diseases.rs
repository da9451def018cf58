use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::{
    state::AppState,
    types::{DiseaseDetail, DiseaseSummary},
};

use super::error_response;

/// GET /api/diseases
///
/// Selector contents, in fixed display order.
pub async fn list_diseases(State(state): State<AppState>) -> Json<Vec<DiseaseSummary>> {
    Json(state.registry.entries().map(DiseaseSummary::from).collect())
}

/// GET /api/diseases/:key
///
/// Field schema for rendering one disease's form.
pub async fn get_disease(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> std::result::Result<Json<DiseaseDetail>, (StatusCode, String)> {
    let entry = state
        .registry
        .by_key(&key)
        .map_err(|e| error_response(&e))?;
    Ok(Json(DiseaseDetail::from(entry)))
}
