use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::animations::AnimationSlot;
use crate::api::state::AppState;

/// GET /api/animations/:slot
///
/// Proxies one decorative Lottie payload. A failed upstream fetch is not an
/// error: the slot simply renders empty, so this answers 204.
pub async fn get_animation(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> impl IntoResponse {
    let Some(slot) = AnimationSlot::from_key(&slot) else {
        return (StatusCode::NOT_FOUND, format!("unknown animation slot: {slot}")).into_response();
    };

    match state.animations.fetch(slot).await {
        Some(payload) => Json(payload).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
