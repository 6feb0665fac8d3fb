//! Peer record and registry statistics
//!
//! This module defines the per-peer state stored in the registry.

use std::time::Instant;

use serde_json::Value;

use super::id::ConnectionId;

/// State kept for one identified peer
///
/// Records are owned by the registry. Callers only ever receive clones, so a
/// record handed out by a lookup is a snapshot and never aliases registry state.
#[derive(Debug, Clone)]
pub struct PeerRecord {
    /// Connection this record belongs to
    pub id: ConnectionId,

    /// Metadata announced by the peer (user name, host name, ...)
    pub identity: Value,

    /// Most recent telemetry frame
    pub last_frame: Option<Value>,

    /// Whether telemetry is currently flowing
    pub streaming: bool,

    /// Number of telemetry frames seen on this connection
    pub frame_count: u64,

    /// When the record was created
    pub connected_at: Instant,
}

impl PeerRecord {
    /// Create a record for a freshly announced peer
    pub(super) fn new(id: ConnectionId, identity: Value) -> Self {
        Self {
            id,
            identity,
            last_frame: None,
            streaming: false,
            frame_count: 0,
            connected_at: Instant::now(),
        }
    }

    /// Record a telemetry frame
    pub(super) fn on_frame(&mut self, frame: Value, streaming: bool) {
        self.last_frame = Some(frame);
        self.streaming = streaming;
        self.frame_count += 1;
    }

    /// Time since the peer announced itself
    pub fn age(&self) -> std::time::Duration {
        self.connected_at.elapsed()
    }
}

/// Registry-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of identified peers
    pub peer_count: usize,
    /// Number of peers currently streaming telemetry
    pub streaming_count: usize,
    /// Telemetry frames seen across all live peers
    pub total_frames: u64,
}
