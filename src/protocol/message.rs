//! Outbound messages and the command envelope
//!
//! Everything the hub emits is an [`OutboundMessage`]: an event name plus a
//! structured body. Messages are shared between recipients through an `Arc`,
//! so a broadcast of a large frame is serialized per recipient but never
//! deep-copied in memory.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::constants::ENVELOPE_CLASS;
use crate::registry::ConnectionId;

/// A message queued for delivery to one or more connections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    /// Outbound event name
    pub event: &'static str,
    /// Structured payload
    #[serde(rename = "data")]
    pub body: Value,
}

/// Reference-counted message as placed on connection queues
pub type SharedMessage = Arc<OutboundMessage>;

impl OutboundMessage {
    /// Create a new message
    pub fn new(event: &'static str, body: Value) -> Self {
        Self { event, body }
    }

    /// Wrap into a shareable handle
    pub fn shared(self) -> SharedMessage {
        Arc::new(self)
    }
}

/// How command envelopes are placed in the `cmd` message body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandEncoding {
    /// Envelope serialized to a JSON string, as deployed agents expect
    #[default]
    JsonString,
    /// Envelope embedded as a structured object
    Object,
}

/// Normalized command delivered to an agent
///
/// Every targeted operator command reaches the agent in this one shape,
/// whichever inbound event produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// Always `"special"`
    pub class: String,
    /// Command kind understood by the agent
    #[serde(rename = "type")]
    pub kind: String,
    /// Command arguments
    pub data: Value,
    /// Connection that issued the command
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub by: Option<ConnectionId>,
}

impl CommandEnvelope {
    /// Create an envelope without a requester
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            class: ENVELOPE_CLASS.to_string(),
            kind: kind.into(),
            data,
            by: None,
        }
    }

    /// Record the requesting connection
    pub fn by(mut self, requester: &ConnectionId) -> Self {
        self.by = Some(requester.clone());
        self
    }

    /// Build the envelope as a JSON object
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("class".into(), Value::String(self.class.clone()));
        obj.insert("type".into(), Value::String(self.kind.clone()));
        obj.insert("data".into(), self.data.clone());
        if let Some(ref by) = self.by {
            obj.insert("by".into(), Value::String(by.to_string()));
        }
        Value::Object(obj)
    }

    /// Encode as a `cmd` message body
    pub fn into_body(self, encoding: CommandEncoding) -> Value {
        let value = self.to_value();
        match encoding {
            CommandEncoding::Object => value,
            CommandEncoding::JsonString => Value::String(value.to_string()),
        }
    }

    /// Decode a `cmd` body in either encoding
    pub fn from_body(body: &Value) -> Option<Self> {
        match body {
            Value::String(s) => serde_json::from_str(s).ok(),
            other => serde_json::from_value(other.clone()).ok(),
        }
    }
}
