//! Wire protocol
//!
//! Event names shared with deployed agents and viewers, classification of
//! inbound events, and the shapes of outbound messages.

pub mod constants;
pub mod event;
pub mod message;

pub use event::{CommandKind, InboundKind, RelayKind};
pub use message::{CommandEncoding, CommandEnvelope, OutboundMessage, SharedMessage};
