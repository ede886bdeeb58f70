use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::otlp::otlp_routes;
use crate::otlp::receiver::OtlpState;
use crate::port::EventSink;

/// Build the HTTP router (health + OTLP logs).
pub fn app_router(sink: Arc<dyn EventSink>) -> Router {
    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let otlp_router = otlp_routes(OtlpState { sink });

    Router::new().merge(v1_health_router).merge(otlp_router)
}

/// Handler for GET /v1/health
async fn health_handler() -> &'static str {
    info!("Health check requested");
    "Healthy"
}
