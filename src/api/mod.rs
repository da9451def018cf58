pub mod handlers;
pub mod routes;
pub mod state;
pub mod types;

pub use routes::create_router;
pub use state::AppState;

use std::net::SocketAddr;

use tracing::info;

use crate::error::{Result, VitalisError};

/// Bind and serve the screening API until shutdown.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(state);

    info!("Starting screening server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(crate::shutdown_signal())
        .await
        .map_err(|e| VitalisError::Internal(format!("Server error: {e}")))?;

    Ok(())
}
