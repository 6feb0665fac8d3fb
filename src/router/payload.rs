//! Payload field access
//!
//! Helpers for pulling required fields out of command payloads. A field that
//! is present but null or empty counts as missing, the same way the viewers
//! and agents in the field treat it.

use serde_json::{Map, Value};

use super::error::RouteError;

/// Require the payload to be a JSON object
pub(super) fn as_object<'a>(
    event: &'static str,
    payload: &'a Value,
) -> Result<&'a Map<String, Value>, RouteError> {
    payload.as_object().ok_or(RouteError::MalformedPayload {
        event,
        reason: "payload must be an object",
    })
}

/// Get a field if it carries a non-empty value
pub(super) fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !is_blank(v))
}

/// Get a required field
pub(super) fn required<'a>(
    event: &'static str,
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, RouteError> {
    present(obj, field).ok_or(RouteError::MissingField { event, field })
}

/// Get a required string field
pub(super) fn required_str<'a>(
    event: &'static str,
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, RouteError> {
    required(event, obj, field)?
        .as_str()
        .ok_or(RouteError::MalformedPayload {
            event,
            reason: "expected a string field",
        })
}

/// Render a scalar the way agents expect it inside command data
///
/// Strings pass through unchanged, booleans become `"true"`/`"false"`,
/// numbers use their JSON text.
pub(super) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}
