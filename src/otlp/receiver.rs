//! OTLP HTTP logs receiver implementation
//!
//! Supports:
//! - POST /v1/logs (OTLP HTTP/protobuf, optionally gzip- or zstd-compressed)

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use opentelemetry_proto::tonic::collector::logs::v1::{
    ExportLogsServiceRequest, ExportLogsServiceResponse,
};
use prost::Message;
use tracing::{error, info, instrument};

use crate::domain::Event;
use crate::otlp::convert::build_events;
use crate::otlp::decompress::decompress;
use crate::port::EventSink;

/// Application state for OTLP handlers
#[derive(Clone)]
pub struct OtlpState {
    pub sink: Arc<dyn EventSink>,
}

/// Per-request outcome counts for one dispatched batch of events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Create Axum router for the OTLP HTTP logs endpoint
pub fn otlp_routes(state: OtlpState) -> Router {
    Router::new()
        .route("/v1/logs", post(receive_logs_http))
        .with_state(state)
}

/// OTLP HTTP logs receiver
///
/// Accepts: application/x-protobuf, `Content-Encoding: gzip | zstd`
/// Returns: application/x-protobuf
///
/// Responds 200 whenever the envelope parses, regardless of how many
/// per-record sends failed. Decompression and decode failures are 400.
#[instrument(skip(state, headers, body), fields(body_size = body.len()))]
async fn receive_logs_http(
    State(state): State<OtlpState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let content_encoding = headers
        .get(header::CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let payload = match decompress(&body, content_encoding) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, encoding = content_encoding, "Failed to decompress OTLP logs request");
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/x-protobuf")],
                Bytes::new(),
            );
        }
    };

    let request = match ExportLogsServiceRequest::decode(payload.as_slice()) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to decode OTLP logs request");
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/x-protobuf")],
                Bytes::new(),
            );
        }
    };

    let events = build_events(&request);
    let summary = dispatch_events(state.sink.as_ref(), events).await;
    info!(
        sent = summary.sent,
        failed = summary.failed,
        "Relayed OTLP log records"
    );

    let response = ExportLogsServiceResponse::default();
    let mut buf = Vec::with_capacity(response.encoded_len());
    let _ = response.encode(&mut buf);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/x-protobuf")],
        Bytes::from(buf),
    )
}

/// Send each event to the sink, one unbuffered call per log record.
///
/// A failed send is logged and counted; it never stops the remaining
/// records in the batch.
pub async fn dispatch_events(sink: &dyn EventSink, events: Vec<Event>) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    for event in events {
        match sink.send_event(event).await {
            Ok(()) => summary.sent += 1,
            Err(e) => {
                error!(error = %e, "Failed to deliver event to sink");
                summary.failed += 1;
            }
        }
    }

    summary
}
