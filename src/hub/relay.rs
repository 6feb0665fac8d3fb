//! Relay hub implementation
//!
//! Composition root: owns the registry, the router and the live connection
//! table, and carries out the router's actions.

use std::collections::VecDeque;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::protocol::{InboundKind, SharedMessage};
use crate::registry::{ConnectionId, PeerRegistry};
use crate::router::{Action, RouteError, Router};
use crate::session::SessionState;
use crate::stats::{HubCounters, HubStats};

use super::config::HubConfig;
use super::table::{ConnectionTable, OutboundSender};

/// Signaling hub
///
/// Shared between all connection tasks behind an `Arc`. Each connection
/// calls [`Hub::connect`] once, [`Hub::handle_event`] for every inbound
/// event in arrival order, and [`Hub::disconnect`] when it ends.
pub struct Hub {
    router: Router,
    connections: ConnectionTable,
    counters: HubCounters,
    config: HubConfig,
}

impl Hub {
    /// Create a hub with default configuration
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Create a hub with custom configuration
    pub fn with_config(config: HubConfig) -> Self {
        Self::with_registry(Arc::new(PeerRegistry::new()), config)
    }

    /// Create a hub around an existing registry
    pub fn with_registry(registry: Arc<PeerRegistry>, config: HubConfig) -> Self {
        Self {
            router: Router::with_config(registry, config.router.clone()),
            connections: ConnectionTable::new(),
            counters: HubCounters::new(),
            config,
        }
    }

    /// Get the peer registry
    pub fn registry(&self) -> &Arc<PeerRegistry> {
        self.router.registry()
    }

    /// Get the hub configuration
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Register a new connection
    ///
    /// Returns the receiving end of the connection's outbound queue. The
    /// peer is not added to the registry until it announces itself.
    pub async fn connect(&self, id: ConnectionId) -> mpsc::Receiver<SharedMessage> {
        let (tx, rx) = mpsc::channel(self.config.queue_capacity);

        if self.connections.insert(id.clone(), tx).await.is_some() {
            tracing::warn!(conn = %id, "Connection id already live, previous connection replaced");
            self.counters.connection_closed(false);
        }
        self.counters.connection_opened();

        tracing::debug!(conn = %id, "Connection registered");
        rx
    }

    /// Route one inbound event from a connection
    ///
    /// Routing failures drop the event and are logged; they never affect the
    /// connection or other peers.
    pub async fn handle_event(&self, source: &ConnectionId, event: &str, payload: Value) {
        if !self.connections.contains(source).await {
            tracing::debug!(conn = %source, event, "Event from unknown connection ignored");
            return;
        }

        let kind = InboundKind::from_name(event);
        let result = match kind {
            Some(kind) => self.router.route_kind(source, kind, payload).await,
            None => Err(RouteError::UnknownEvent(event.to_string())),
        };

        match result {
            Ok(actions) => {
                self.counters.event_received(true);
                self.connections
                    .update_session(source, |session| {
                        session.on_event(true);
                        if kind == Some(InboundKind::Identify) {
                            session.identify();
                        }
                    })
                    .await;
                self.execute(actions).await;
            }
            Err(e) => {
                self.counters.event_received(false);
                self.connections
                    .update_session(source, |session| session.on_event(false))
                    .await;
                if e.is_peer_fault() {
                    tracing::warn!(conn = %source, event, error = %e, "Event dropped");
                } else {
                    tracing::debug!(conn = %source, event, "Unknown event ignored");
                }
            }
        }
    }

    /// Remove a connection
    ///
    /// Announces the departure if the peer had identified itself. Calling
    /// this for an id that is already gone does nothing.
    pub async fn disconnect(&self, id: &ConnectionId) {
        if let Some(session) = self.connections.remove(id).await {
            self.counters.connection_closed(false);
            tracing::debug!(
                conn = %id,
                duration_secs = session.duration().as_secs(),
                events = session.events_received,
                "Connection closed"
            );
        }

        // Routed even when the slot is already gone: an identity announced
        // while an implicit disconnect was in flight must still be removed.
        let actions = self.router.route_disconnect(id).await;
        self.execute(actions).await;
    }

    /// Copy of a connection's session state
    pub async fn session(&self, id: &ConnectionId) -> Option<SessionState> {
        self.connections.session(id).await
    }

    /// Number of live connections
    pub async fn connection_count(&self) -> usize {
        self.connections.len().await
    }

    /// Snapshot of hub statistics
    pub fn stats(&self) -> HubStats {
        self.counters.snapshot()
    }

    /// Deliver actions, following up on connections found closed
    async fn execute(&self, actions: Vec<Action>) {
        let mut pending = VecDeque::new();
        pending.push_back(actions);

        while let Some(actions) = pending.pop_front() {
            let mut closed = Vec::new();

            for action in actions {
                self.deliver(action, &mut closed).await;
            }

            for id in closed {
                if self.connections.remove(&id).await.is_some() {
                    self.counters.connection_closed(true);
                    tracing::warn!(conn = %id, "Outbound queue closed, treating connection as disconnected");
                    pending.push_back(self.router.route_disconnect(&id).await);
                }
            }
        }
    }

    async fn deliver(&self, action: Action, closed: &mut Vec<ConnectionId>) {
        match action {
            Action::Broadcast { message, exclude } => {
                let targets = self.connections.senders(exclude.as_ref()).await;
                self.counters.broadcast();

                let outcomes: Vec<(ConnectionId, bool)> = targets
                    .into_iter()
                    .map(|(id, tx)| {
                        let queued = self.enqueue(&id, &tx, &message, closed);
                        (id, queued)
                    })
                    .collect();

                tracing::trace!(
                    event = message.event,
                    recipients = outcomes.len(),
                    "Broadcast delivered"
                );
                self.connections.record_deliveries(&outcomes).await;
            }
            Action::SendTo { target, message } => match self.connections.sender(&target).await {
                Some(tx) => {
                    let queued = self.enqueue(&target, &tx, &message, closed);
                    self.connections
                        .record_deliveries(&[(target, queued)])
                        .await;
                }
                None => {
                    self.counters.message_dropped();
                    tracing::warn!(
                        conn = %target,
                        event = message.event,
                        "Target connection not found, message dropped"
                    );
                }
            },
        }
    }

    /// Push a message onto one connection's queue without waiting
    fn enqueue(
        &self,
        id: &ConnectionId,
        tx: &OutboundSender,
        message: &SharedMessage,
        closed: &mut Vec<ConnectionId>,
    ) -> bool {
        match tx.try_send(Arc::clone(message)) {
            Ok(()) => {
                self.counters.message_sent();
                true
            }
            Err(TrySendError::Full(_)) => {
                self.counters.message_dropped();
                tracing::warn!(conn = %id, event = message.event, "Outbound queue full, message dropped");
                false
            }
            Err(TrySendError::Closed(_)) => {
                self.counters.message_dropped();
                closed.push(id.clone());
                false
            }
        }
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}
