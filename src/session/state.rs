//! Connection state machine
//!
//! Tracks one connection from accept to close:
//! `Connected -> Identified -> Disconnected`. A closed connection never comes
//! back; a reconnecting peer gets a new id and starts over at `Connected`.

use std::time::{Duration, Instant};

use crate::registry::ConnectionId;

/// Connection lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Connected, identity not yet announced
    Connected,
    /// Identity announced, peer is present in the registry
    Identified,
    /// Connection closed (terminal)
    Disconnected,
}

/// Per-connection state and counters
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Connection id
    pub id: ConnectionId,

    /// Current phase
    pub phase: SessionPhase,

    /// Connection start time
    pub connected_at: Instant,

    /// Time of the first identity announcement
    pub identified_at: Option<Instant>,

    /// Inbound events received
    pub events_received: u64,

    /// Inbound events dropped by the router
    pub events_dropped: u64,

    /// Outbound messages queued for this connection
    pub messages_queued: u64,

    /// Outbound messages dropped because the queue was full
    pub messages_dropped: u64,
}

impl SessionState {
    /// Create a new session state
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            phase: SessionPhase::Connected,
            connected_at: Instant::now(),
            identified_at: None,
            events_received: 0,
            events_dropped: 0,
            messages_queued: 0,
            messages_dropped: 0,
        }
    }

    /// Peer announced its identity
    ///
    /// Re-announcing keeps the original identification time.
    pub fn identify(&mut self) {
        if self.phase == SessionPhase::Connected {
            self.phase = SessionPhase::Identified;
            self.identified_at = Some(Instant::now());
        }
    }

    /// Connection closed
    pub fn close(&mut self) {
        self.phase = SessionPhase::Disconnected;
    }

    /// Count an inbound event and whether routing accepted it
    pub fn on_event(&mut self, routed: bool) {
        self.events_received += 1;
        if !routed {
            self.events_dropped += 1;
        }
    }

    /// Count an outbound delivery attempt
    pub fn on_delivery(&mut self, queued: bool) {
        if queued {
            self.messages_queued += 1;
        } else {
            self.messages_dropped += 1;
        }
    }

    /// Check if the peer has announced itself
    pub fn is_identified(&self) -> bool {
        self.phase == SessionPhase::Identified
    }

    /// Get session duration
    pub fn duration(&self) -> Duration {
        self.connected_at.elapsed()
    }
}
