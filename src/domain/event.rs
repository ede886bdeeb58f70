//! Flattened telemetry event model

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single flattened telemetry event, ready for delivery to the sink.
///
/// Fields are flat string keys mapped to JSON scalars; nested OTLP values
/// are serialized to JSON text before they land here. Later inserts win on
/// key collision.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Wall-clock time the log record occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Flat field map sent to the sink as the event body
    pub fields: Map<String, Value>,
}
