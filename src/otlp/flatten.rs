//! Flattening of OTLP attribute lists into flat string-keyed event fields.

use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
use serde_json::{Map, Value};

/// Resolve an `AnyValue` to a JSON scalar, or `None` when it carries nothing
/// a flat event field can hold.
///
/// Arrays and key/value lists are serialized to their JSON text. A kvlist
/// becomes a sequence of single-entry maps, one per key, preserving order;
/// entries are never merged into a single map. Elements that do not resolve
/// appear as JSON `null` inside the serialized text. If serialization fails
/// the value resolves to nothing and the attribute is dropped.
pub fn resolve_any_value(value: &AnyValue) -> Option<Value> {
    match value.value.as_ref()? {
        any_value::Value::StringValue(s) => Some(Value::String(s.clone())),
        any_value::Value::BoolValue(b) => Some(Value::Bool(*b)),
        any_value::Value::IntValue(i) => Some(Value::Number((*i).into())),
        // Non-finite doubles have no JSON representation and resolve to nothing
        any_value::Value::DoubleValue(d) => serde_json::Number::from_f64(*d).map(Value::Number),
        any_value::Value::ArrayValue(array) => {
            let items: Vec<Value> = array
                .values
                .iter()
                .map(|item| resolve_any_value(item).unwrap_or(Value::Null))
                .collect();
            serde_json::to_string(&items).ok().map(Value::String)
        }
        any_value::Value::KvlistValue(list) => {
            let entries: Vec<Map<String, Value>> = list
                .values
                .iter()
                .map(|kv| {
                    let mut entry = Map::new();
                    entry.insert(
                        kv.key.clone(),
                        kv.value
                            .as_ref()
                            .and_then(resolve_any_value)
                            .unwrap_or(Value::Null),
                    );
                    entry
                })
                .collect();
            serde_json::to_string(&entries).ok().map(Value::String)
        }
        any_value::Value::BytesValue(_) => None,
    }
}

/// Append attributes to `fields`, skipping entries whose key is empty or
/// whose value does not resolve to a scalar.
pub fn append_attributes(fields: &mut Map<String, Value>, attributes: &[KeyValue]) {
    for attribute in attributes {
        if attribute.key.is_empty() {
            continue;
        }
        let Some(value) = attribute.value.as_ref().and_then(resolve_any_value) else {
            continue;
        };
        fields.insert(rewrite_key(&attribute.key).to_string(), value);
    }
}

/// Keys containing `"Scope"` are stored as the suffix after the key's first
/// `:`. With no colon present the suffix starts at index 0, leaving the key
/// unchanged.
fn rewrite_key(key: &str) -> &str {
    if key.contains("Scope") {
        let suffix_start = key.find(':').map_or(0, |i| i + 1);
        &key[suffix_start..]
    } else {
        key
    }
}
