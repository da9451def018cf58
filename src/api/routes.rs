use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Embedded form page
        .route("/", get(index_page))
        // Disease endpoints
        .route("/api/diseases", get(handlers::list_diseases))
        .route("/api/diseases/:key", get(handlers::get_disease))
        .route("/api/diseases/:key/predict", post(handlers::predict))
        // Decorative animation proxy
        .route("/api/animations/:slot", get(handlers::get_animation))
        // Health endpoints
        .route("/health", get(handlers::health_handler))
        .route("/healthz", get(handlers::liveness_handler))
        .route("/readyz", get(handlers::readiness_handler))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("index.html"))
}
