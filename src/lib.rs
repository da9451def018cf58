pub mod animations;
pub mod api;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ml;
pub mod registry;

pub use animations::{AnimationClient, AnimationSlot};
pub use config::AppConfig;
pub use dispatch::{Prediction, Verdict};
pub use error::{Result, VitalisError};
pub use ml::Predictor;
pub use registry::{Disease, DiseaseEntry, FieldSpec, ModelRegistry};

use tokio::signal;
use tracing::error;

/// Resolve when the process receives ctrl-c or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
