//! Routing actions
//!
//! The router never touches connections. It returns a list of actions and the
//! hub carries them out.

use crate::protocol::{OutboundMessage, SharedMessage};
use crate::registry::ConnectionId;

/// Who receives a broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients {
    /// Every live connection, the source included
    All,
    /// Every live connection except the one the event came from
    AllExceptSource,
}

/// One delivery produced by routing an event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Deliver to every live connection, optionally skipping one
    Broadcast {
        message: SharedMessage,
        exclude: Option<ConnectionId>,
    },
    /// Deliver to exactly one connection
    SendTo {
        target: ConnectionId,
        message: SharedMessage,
    },
}

impl Action {
    /// Broadcast `message` from `source` to the given recipients
    pub fn broadcast(source: &ConnectionId, recipients: Recipients, message: OutboundMessage) -> Self {
        let exclude = match recipients {
            Recipients::All => None,
            Recipients::AllExceptSource => Some(source.clone()),
        };
        Action::Broadcast {
            message: message.shared(),
            exclude,
        }
    }

    /// Send `message` to a single connection
    pub fn send_to(target: ConnectionId, message: OutboundMessage) -> Self {
        Action::SendTo {
            target,
            message: message.shared(),
        }
    }

    /// The message carried by this action
    pub fn message(&self) -> &OutboundMessage {
        match self {
            Action::Broadcast { message, .. } | Action::SendTo { message, .. } => message.as_ref(),
        }
    }

    /// Check if this action fans out to every connection
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Action::Broadcast { .. })
    }
}
