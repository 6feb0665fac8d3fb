//! Routing error types
//!
//! A routing error means one inbound event was dropped. The hub logs it and
//! carries on; none of these are fatal to the hub or to the connection.

use crate::registry::ConnectionId;

/// Error type for routing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Event name is not part of the protocol
    UnknownEvent(String),
    /// Payload has the wrong shape for its event
    MalformedPayload {
        event: &'static str,
        reason: &'static str,
    },
    /// A required payload field is missing or empty
    MissingField {
        event: &'static str,
        field: &'static str,
    },
    /// Command addressed to a connection that has not announced itself
    UnknownTarget {
        event: &'static str,
        target: ConnectionId,
    },
}

impl RouteError {
    /// Whether the event was dropped because of what the peer sent
    ///
    /// Unknown events are routine (transport-level chatter), everything else
    /// points at a misbehaving or outdated peer.
    pub fn is_peer_fault(&self) -> bool {
        !matches!(self, RouteError::UnknownEvent(_))
    }
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::UnknownEvent(name) => write!(f, "Unknown event: {}", name),
            RouteError::MalformedPayload { event, reason } => {
                write!(f, "Malformed {} payload: {}", event, reason)
            }
            RouteError::MissingField { event, field } => {
                write!(f, "{} payload missing required field '{}'", event, field)
            }
            RouteError::UnknownTarget { event, target } => {
                write!(f, "{} addressed to unknown connection {}", event, target)
            }
        }
    }
}

impl std::error::Error for RouteError {}
