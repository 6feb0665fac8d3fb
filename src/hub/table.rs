//! Live connection table
//!
//! Maps connection ids to their outbound queues. The lock only guards the
//! map; callers copy senders out and push messages after it is released, so
//! a slow peer never holds up the table.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};

use crate::protocol::SharedMessage;
use crate::registry::ConnectionId;
use crate::session::SessionState;

/// Outbound queue of one connection
pub type OutboundSender = mpsc::Sender<SharedMessage>;

struct Slot {
    tx: OutboundSender,
    session: SessionState,
}

/// Table of live connections
pub struct ConnectionTable {
    slots: RwLock<HashMap<ConnectionId, Slot>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Add a connection, returning the session it replaced if the id was live
    pub async fn insert(&self, id: ConnectionId, tx: OutboundSender) -> Option<SessionState> {
        let slot = Slot {
            tx,
            session: SessionState::new(id.clone()),
        };
        self.slots
            .write()
            .await
            .insert(id, slot)
            .map(|old| old.session)
    }

    /// Remove a connection, returning its final session state
    pub async fn remove(&self, id: &ConnectionId) -> Option<SessionState> {
        self.slots.write().await.remove(id).map(|slot| {
            let mut session = slot.session;
            session.close();
            session
        })
    }

    /// Check whether a connection is live
    pub async fn contains(&self, id: &ConnectionId) -> bool {
        self.slots.read().await.contains_key(id)
    }

    /// Get the outbound queue of one connection
    pub async fn sender(&self, id: &ConnectionId) -> Option<OutboundSender> {
        self.slots.read().await.get(id).map(|slot| slot.tx.clone())
    }

    /// Copy out the outbound queues of every live connection
    pub async fn senders(&self, exclude: Option<&ConnectionId>) -> Vec<(ConnectionId, OutboundSender)> {
        self.slots
            .read()
            .await
            .iter()
            .filter(|(id, _)| Some(*id) != exclude)
            .map(|(id, slot)| (id.clone(), slot.tx.clone()))
            .collect()
    }

    /// Apply a change to a connection's session state
    pub async fn update_session<F>(&self, id: &ConnectionId, f: F)
    where
        F: FnOnce(&mut SessionState),
    {
        if let Some(slot) = self.slots.write().await.get_mut(id) {
            f(&mut slot.session);
        }
    }

    /// Record delivery outcomes for a batch of connections
    pub async fn record_deliveries(&self, outcomes: &[(ConnectionId, bool)]) {
        if outcomes.is_empty() {
            return;
        }
        let mut slots = self.slots.write().await;
        for (id, queued) in outcomes {
            if let Some(slot) = slots.get_mut(id) {
                slot.session.on_delivery(*queued);
            }
        }
    }

    /// Copy of a connection's session state
    pub async fn session(&self, id: &ConnectionId) -> Option<SessionState> {
        self.slots.read().await.get(id).map(|slot| slot.session.clone())
    }

    /// Number of live connections
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    /// Check if there are no live connections
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new()
    }
}
