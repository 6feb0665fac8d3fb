//! Peer registry implementation
//!
//! The central registry that tracks every identified peer, keyed by the
//! connection it arrived on.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

use super::entry::{PeerRecord, RegistryStats};
use super::id::ConnectionId;

/// Central registry of identified peers
///
/// Thread-safe via `RwLock`. All mutation is serialized through the single
/// write lock, and the lock is only held while the map itself is touched:
/// lookups clone the record out, listings build a snapshot. Nothing here
/// awaits anything but the lock.
pub struct PeerRegistry {
    /// Map of connection id to peer record
    peers: RwLock<HashMap<ConnectionId, PeerRecord>>,
}

impl PeerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            peers: RwLock::new(HashMap::new()),
        }
    }

    /// Register or re-announce a peer
    ///
    /// A repeated announcement from the same connection overwrites the
    /// identity in place; telemetry state of the existing record is kept.
    pub async fn add(&self, id: &ConnectionId, identity: Value) {
        let mut peers = self.peers.write().await;

        if let Some(record) = peers.get_mut(id) {
            tracing::info!(
                conn = %id,
                previous = %record.identity,
                identity = %identity,
                "Peer re-announced, identity overwritten"
            );
            record.identity = identity;
        } else {
            tracing::info!(conn = %id, identity = %identity, "Peer registered");
            peers.insert(id.clone(), PeerRecord::new(id.clone(), identity));
        }
    }

    /// Remove a peer
    ///
    /// Returns the removed record, or `None` if the id was not registered.
    /// Removing twice is not an error.
    pub async fn remove(&self, id: &ConnectionId) -> Option<PeerRecord> {
        let removed = self.peers.write().await.remove(id);

        match removed {
            Some(ref record) => tracing::info!(
                conn = %id,
                frames = record.frame_count,
                present_secs = record.age().as_secs(),
                "Peer removed"
            ),
            None => tracing::debug!(conn = %id, "Remove for unregistered connection ignored"),
        }

        removed
    }

    /// Look up a peer, returning a copy of its record
    pub async fn get(&self, id: &ConnectionId) -> Option<PeerRecord> {
        self.peers.read().await.get(id).cloned()
    }

    /// Check whether a connection has announced itself
    pub async fn contains(&self, id: &ConnectionId) -> bool {
        self.peers.read().await.contains_key(id)
    }

    /// Snapshot of every registered peer's identity
    pub async fn list_all(&self) -> HashMap<ConnectionId, Value> {
        self.peers
            .read()
            .await
            .iter()
            .map(|(id, record)| (id.clone(), record.identity.clone()))
            .collect()
    }

    /// Record a telemetry frame for a peer
    ///
    /// Silently ignored when the connection is not registered: a frame racing
    /// a disconnect, or an agent streaming before it announced itself.
    pub async fn update_telemetry(&self, id: &ConnectionId, frame: Value, streaming: bool) {
        let mut peers = self.peers.write().await;

        if let Some(record) = peers.get_mut(id) {
            record.on_frame(frame, streaming);
        }
    }

    /// Set a peer's streaming flag without touching its last frame
    pub async fn set_streaming(&self, id: &ConnectionId, streaming: bool) {
        let mut peers = self.peers.write().await;

        if let Some(record) = peers.get_mut(id) {
            if record.streaming != streaming {
                tracing::debug!(conn = %id, streaming, "Peer streaming state changed");
            }
            record.streaming = streaming;
        }
    }

    /// Number of registered peers
    pub async fn peer_count(&self) -> usize {
        self.peers.read().await.len()
    }

    /// Get registry statistics
    pub async fn stats(&self) -> RegistryStats {
        let peers = self.peers.read().await;

        RegistryStats {
            peer_count: peers.len(),
            streaming_count: peers.values().filter(|r| r.streaming).count(),
            total_frames: peers.values().map(|r| r.frame_count).sum(),
        }
    }
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
