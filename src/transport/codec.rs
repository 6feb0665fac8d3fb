//! Wire codec
//!
//! Converts WebSocket frames to and from hub events.
//!
//! Text frames carry `{"event": <name>, "data": <payload>}`; the
//! `[<name>, <payload>]` array form is accepted as well. Binary frames carry
//! `[u8 name_len][name][payload bytes]`.
//!
//! The router only ever sees JSON values, so every byte/string decision is
//! made here:
//! - raw media payloads (`frame`, `record-frame`, `file_chunk`) in binary
//!   frames become base64 strings; in text frames they pass through untouched
//! - other binary payloads become a string when they are UTF-8, base64
//!   otherwise
//! - for non-raw events, a string holding a JSON object or array is decoded

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::{Buf, Bytes};
use serde_json::{json, Value};

use crate::error::CodecError;
use crate::protocol::constants::OUT_CONNECTED;
use crate::protocol::{InboundKind, OutboundMessage};

/// One decoded inbound event
#[derive(Debug, Clone, PartialEq)]
pub struct InboundFrame {
    /// Event name as sent by the peer
    pub event: String,
    /// Normalized payload
    pub payload: Value,
}

/// Decode a text frame
pub fn decode_text(text: &str) -> Result<InboundFrame, CodecError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CodecError::InvalidJson(e.to_string()))?;

    let (event, payload) = match value {
        Value::Object(mut obj) => {
            let event = match obj.remove("event") {
                Some(Value::String(name)) => name,
                _ => return Err(CodecError::MissingEventName),
            };
            (event, obj.remove("data").unwrap_or(Value::Null))
        }
        Value::Array(items) => {
            let mut items = items.into_iter();
            let event = match items.next() {
                Some(Value::String(name)) => name,
                _ => return Err(CodecError::MissingEventName),
            };
            (event, items.next().unwrap_or(Value::Null))
        }
        _ => return Err(CodecError::MissingEventName),
    };

    if event.is_empty() {
        return Err(CodecError::MissingEventName);
    }

    let payload = normalize_payload(&event, payload);
    Ok(InboundFrame { event, payload })
}

/// Decode a binary frame
pub fn decode_binary(mut frame: Bytes) -> Result<InboundFrame, CodecError> {
    if frame.is_empty() {
        return Err(CodecError::TruncatedBinary {
            declared: 1,
            available: 0,
        });
    }

    let name_len = frame.get_u8() as usize;
    if name_len == 0 {
        return Err(CodecError::MissingEventName);
    }
    if frame.len() < name_len {
        return Err(CodecError::TruncatedBinary {
            declared: name_len,
            available: frame.len(),
        });
    }

    let name = frame.split_to(name_len);
    let event = std::str::from_utf8(&name)
        .map_err(|_| CodecError::InvalidEventName)?
        .to_string();

    let raw = InboundKind::from_name(&event).is_some_and(|kind| kind.carries_raw_payload());
    let payload = if frame.is_empty() {
        Value::Null
    } else if raw {
        Value::String(STANDARD.encode(&frame))
    } else {
        match std::str::from_utf8(&frame) {
            Ok(text) => Value::String(text.to_string()),
            Err(_) => Value::String(STANDARD.encode(&frame)),
        }
    };

    let payload = normalize_payload(&event, payload);
    Ok(InboundFrame { event, payload })
}

/// Decode JSON carried inside a string payload
///
/// Raw media events and strings that do not hold a JSON object or array are
/// returned unchanged.
pub fn normalize_payload(event: &str, payload: Value) -> Value {
    let raw = InboundKind::from_name(event).is_some_and(|kind| kind.carries_raw_payload());
    if raw {
        return payload;
    }

    match payload {
        Value::String(text) => {
            let trimmed = text.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                match serde_json::from_str::<Value>(&text) {
                    Ok(decoded) => decoded,
                    Err(_) => Value::String(text),
                }
            } else {
                Value::String(text)
            }
        }
        other => other,
    }
}

/// Encode an outbound message as text frame content
pub fn encode(message: &OutboundMessage) -> Result<String, CodecError> {
    serde_json::to_string(message).map_err(|e| CodecError::InvalidJson(e.to_string()))
}

/// Greeting sent to every new connection
pub fn greeting() -> OutboundMessage {
    OutboundMessage::new(OUT_CONNECTED, json!({ "status": "connected" }))
}
