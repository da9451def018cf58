use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::animations::AnimationClient;
use crate::registry::ModelRegistry;

/// Shared application state for API handlers.
///
/// The registry is loaded once at startup and never mutated, so handlers
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded classifier registry
    pub registry: Arc<ModelRegistry>,

    /// Shared fetcher for decorative animations
    pub animations: Arc<AnimationClient>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(registry: Arc<ModelRegistry>, animations: Arc<AnimationClient>) -> Self {
        Self {
            registry,
            animations,
            start_time: Utc::now(),
        }
    }

    /// Get system uptime in seconds
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
