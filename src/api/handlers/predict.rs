use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error};

use crate::animations::AnimationSlot;
use crate::api::{
    state::AppState,
    types::{PredictRequest, PredictResponse},
};
use crate::dispatch::{self, Verdict};

use super::error_response;

/// POST /api/diseases/:key/predict
///
/// Runs the full dispatch flow: completeness check, coercion, ordered vector
/// assembly, classifier call, verdict mapping. All submission failures come
/// back as error responses; nothing here can take the process down.
pub async fn predict(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<PredictRequest>,
) -> std::result::Result<Json<PredictResponse>, (StatusCode, String)> {
    let entry = state
        .registry
        .by_key(&key)
        .map_err(|e| error_response(&e))?;

    let prediction = dispatch::submit(entry, &request.values).map_err(|e| {
        if e.is_user_error() {
            debug!(disease = %key, error = %e, "submission rejected");
        } else {
            error!(disease = %key, error = %e, "prediction failed");
        }
        error_response(&e)
    })?;

    let slot = match prediction.verdict {
        Verdict::Positive => AnimationSlot::Positive,
        Verdict::Negative => AnimationSlot::Negative,
    };
    let animation = state.animations.fetch(slot).await;

    Ok(Json(PredictResponse {
        disease: entry.disease.display_name().to_string(),
        verdict: prediction.verdict.as_str().to_string(),
        message: prediction.message,
        animation,
    }))
}
