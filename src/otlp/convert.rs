//! Conversion from decoded OTLP log requests to flat sink events.

use chrono::DateTime;
use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::logs::v1::LogRecord;
use serde_json::{Map, Value};

use crate::domain::Event;
use crate::otlp::flatten::{append_attributes, resolve_any_value};

const TRACE_ID_SHORT_LENGTH: usize = 8;
const TRACE_ID_LONG_LENGTH: usize = 16;

/// Marker distinguishing relayed log records from regular spans downstream.
const ANNOTATION_TYPE: &str = "span_event";

/// Flatten every log record in the request into a sink event, walking the
/// resource -> scope -> record hierarchy in order.
pub fn build_events(request: &ExportLogsServiceRequest) -> Vec<Event> {
    let mut events = Vec::new();

    for resource_logs in &request.resource_logs {
        let mut resource_fields = Map::new();
        if let Some(resource) = &resource_logs.resource {
            append_attributes(&mut resource_fields, &resource.attributes);
        }

        for scope_logs in &resource_logs.scope_logs {
            for record in &scope_logs.log_records {
                events.push(build_event(record, &resource_fields));
            }
        }
    }

    events
}

fn build_event(record: &LogRecord, resource_fields: &Map<String, Value>) -> Event {
    let mut fields = resource_fields.clone();

    let mut log_fields = Map::new();
    append_attributes(&mut log_fields, &record.attributes);

    // Resource fields are inserted twice before log fields; log fields win
    // on key collision either way (see DESIGN.md).
    fields.extend(resource_fields.clone());
    fields.extend(log_fields);

    let name = record
        .body
        .as_ref()
        .and_then(resolve_any_value)
        .unwrap_or(Value::Null);
    fields.insert("name".to_string(), name);
    fields.insert(
        "SeverityText".to_string(),
        Value::String(record.severity_text.clone()),
    );
    fields.insert(
        "SeverityNumber".to_string(),
        Value::Number(record.severity_number.into()),
    );
    fields.insert(
        "trace.trace_id".to_string(),
        Value::String(canonical_trace_id(&record.trace_id)),
    );
    fields.insert(
        "trace.parent_id".to_string(),
        Value::String(hex::encode(&record.span_id)),
    );
    fields.insert(
        "meta.annotation_type".to_string(),
        Value::String(ANNOTATION_TYPE.to_string()),
    );

    Event {
        timestamp: DateTime::from_timestamp_nanos(record.time_unix_nano as i64),
        fields,
    }
}

/// Canonicalize a trace identifier to a fixed-form hex string.
///
/// A 16-byte ID whose first 8 bytes are all zero carries a legacy 8-byte ID
/// in its low bytes; only the last 8 bytes are encoded, yielding 16 hex
/// characters. Every other length is hex-encoded as-is.
pub fn canonical_trace_id(trace_id: &[u8]) -> String {
    if trace_id.len() == TRACE_ID_LONG_LENGTH
        && trace_id[..TRACE_ID_SHORT_LENGTH].iter().all(|&b| b == 0)
    {
        hex::encode(&trace_id[TRACE_ID_SHORT_LENGTH..])
    } else {
        hex::encode(trace_id)
    }
}
