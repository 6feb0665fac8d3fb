//! Statistics for the relay hub

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Hub-wide statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Total connections ever accepted
    pub total_connections: u64,
    /// Currently open connections
    pub active_connections: u64,
    /// Connections closed by the hub after a failed send
    pub implicit_disconnects: u64,
    /// Inbound events received
    pub events_received: u64,
    /// Inbound events dropped by the router
    pub events_dropped: u64,
    /// Broadcasts fanned out
    pub broadcasts: u64,
    /// Messages queued on connections
    pub messages_sent: u64,
    /// Messages dropped (full queue or missing target)
    pub messages_dropped: u64,
    /// Time since the hub was created
    pub uptime: Duration,
}

impl HubStats {
    /// Fraction of inbound events that were dropped
    pub fn drop_rate(&self) -> f64 {
        if self.events_received > 0 {
            self.events_dropped as f64 / self.events_received as f64
        } else {
            0.0
        }
    }
}

/// Live counters behind [`HubStats`]
///
/// Updated lock-free from every connection task.
#[derive(Debug)]
pub struct HubCounters {
    started_at: Instant,
    total_connections: AtomicU64,
    active_connections: AtomicU64,
    implicit_disconnects: AtomicU64,
    events_received: AtomicU64,
    events_dropped: AtomicU64,
    broadcasts: AtomicU64,
    messages_sent: AtomicU64,
    messages_dropped: AtomicU64,
}

impl HubCounters {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            total_connections: AtomicU64::new(0),
            active_connections: AtomicU64::new(0),
            implicit_disconnects: AtomicU64::new(0),
            events_received: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            broadcasts: AtomicU64::new(0),
            messages_sent: AtomicU64::new(0),
            messages_dropped: AtomicU64::new(0),
        }
    }

    pub fn connection_opened(&self) {
        self.total_connections.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self, implicit: bool) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
        if implicit {
            self.implicit_disconnects.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn event_received(&self, routed: bool) {
        self.events_received.fetch_add(1, Ordering::Relaxed);
        if !routed {
            self.events_dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn broadcast(&self) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn message_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn message_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a consistent-enough snapshot of all counters
    pub fn snapshot(&self) -> HubStats {
        HubStats {
            total_connections: self.total_connections.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            implicit_disconnects: self.implicit_disconnects.load(Ordering::Relaxed),
            events_received: self.events_received.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            broadcasts: self.broadcasts.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
            uptime: self.started_at.elapsed(),
        }
    }
}

impl Default for HubCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_stats_default() {
        let stats = HubStats::default();
        assert_eq!(stats.total_connections, 0);
        assert_eq!(stats.active_connections, 0);
        assert_eq!(stats.events_received, 0);
        assert_eq!(stats.drop_rate(), 0.0);
    }

    #[test]
    fn test_connection_counters() {
        let counters = HubCounters::new();

        counters.connection_opened();
        counters.connection_opened();
        counters.connection_closed(false);
        counters.connection_opened();
        counters.connection_closed(true);

        let stats = counters.snapshot();
        assert_eq!(stats.total_connections, 3);
        assert_eq!(stats.active_connections, 1);
        assert_eq!(stats.implicit_disconnects, 1);
    }

    #[test]
    fn test_event_counters_and_drop_rate() {
        let counters = HubCounters::new();

        counters.event_received(true);
        counters.event_received(true);
        counters.event_received(true);
        counters.event_received(false);

        let stats = counters.snapshot();
        assert_eq!(stats.events_received, 4);
        assert_eq!(stats.events_dropped, 1);
        assert_eq!(stats.drop_rate(), 0.25);
    }

    #[test]
    fn test_delivery_counters() {
        let counters = HubCounters::new();

        counters.broadcast();
        counters.message_sent();
        counters.message_sent();
        counters.message_dropped();

        let stats = counters.snapshot();
        assert_eq!(stats.broadcasts, 1);
        assert_eq!(stats.messages_sent, 2);
        assert_eq!(stats.messages_dropped, 1);
    }
}
