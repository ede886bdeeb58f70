mod router;
pub mod server;
mod state;
pub mod tracing;

use crate::config;
use crate::error::RelayError;

/// Application entry point. Initializes tracing, configuration, and starts
/// the server.
pub async fn run() -> Result<(), RelayError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings =
        config::get_configuration().map_err(|e| RelayError::Config(e.to_string()))?;
    ::tracing::info!("Loaded settings");

    let app_state = state::AppState::from_settings(&settings)?;
    let app = router::app_router(app_state.sink);

    server::serve(app, settings.http_port).await
}
