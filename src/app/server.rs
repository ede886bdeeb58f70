use axum::Router;
use tokio::signal;
use tracing::info;

use crate::error::RelayError;

/// Start the HTTP server with graceful shutdown on SIGINT/SIGTERM.
pub async fn serve(app: Router, http_port: u16) -> Result<(), RelayError> {
    let bind_addr = format!("0.0.0.0:{http_port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| RelayError::Bind {
            address: bind_addr.clone(),
            source: e,
        })?;

    info!("Listening on {}", listener.local_addr()?);
    info!("Endpoints:");
    info!("  - GET  /v1/health  (health check)");
    info!("  - POST /v1/logs    (OTLP logs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
