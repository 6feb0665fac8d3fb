//! Hub configuration

use crate::router::RouterConfig;

/// Default capacity of each connection's outbound queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Hub configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Messages buffered per connection before new ones are dropped
    pub queue_capacity: usize,

    /// Routing policy
    pub router: RouterConfig,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            router: RouterConfig::default(),
        }
    }
}

impl HubConfig {
    /// Set the per-connection queue capacity (at least 1)
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Set the routing policy
    pub fn router(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    /// Choose whether agents receive their own telemetry back
    pub fn echo_telemetry(mut self, echo: bool) -> Self {
        self.router = self.router.echo_telemetry(echo);
        self
    }
}
