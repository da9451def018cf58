//! Health probes for process supervision (systemd/k8s style).

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::registry::Disease;

/// Health status for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Component health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall system health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub models_loaded: usize,
    pub components: Vec<ComponentHealth>,
}

fn build_health(state: &AppState) -> HealthResponse {
    let loaded = state.registry.len();
    let registry_status = if loaded == Disease::ALL.len() {
        HealthStatus::Healthy
    } else if loaded > 0 {
        HealthStatus::Degraded
    } else {
        HealthStatus::Unhealthy
    };

    let components = vec![ComponentHealth {
        name: "model_registry".to_string(),
        status: registry_status,
        message: (registry_status != HealthStatus::Healthy)
            .then(|| format!("{loaded}/{} classifiers loaded", Disease::ALL.len())),
    }];

    HealthResponse {
        status: registry_status,
        timestamp: Utc::now(),
        uptime_seconds: state.uptime_seconds(),
        models_loaded: loaded,
        components,
    }
}

/// Full health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = build_health(&state);
    let status_code = match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(health))
}

/// Liveness probe - is the process alive?
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe - is the registry loaded and ready for submissions?
pub async fn readiness_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.registry.len() == Disease::ALL.len() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
