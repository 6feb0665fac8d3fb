//! Server configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::hub::HubConfig;

/// Port used when nothing else is configured
pub const DEFAULT_PORT: u16 = 10000;

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Maximum concurrent connections (0 = unlimited)
    pub max_connections: usize,

    /// Enable TCP_NODELAY (disable Nagle's algorithm)
    pub tcp_nodelay: bool,

    /// WebSocket upgrade must complete within this time
    pub handshake_timeout: Duration,

    /// Interval between keepalive pings (zero disables them)
    pub ping_interval: Duration,

    /// Disconnect if nothing is received for this long (zero disables it)
    pub idle_timeout: Duration,

    /// Send `connected` to each new connection before hub traffic
    pub greet_on_connect: bool,

    /// Hub settings
    pub hub: HubConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            max_connections: 0, // Unlimited
            tcp_nodelay: true, // Frames are latency sensitive
            handshake_timeout: Duration::from_secs(10),
            ping_interval: Duration::from_secs(25),
            idle_timeout: Duration::from_secs(60),
            greet_on_connect: true,
            hub: HubConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Default config with the port taken from `PORT` when set
    pub fn from_env() -> Result<Self> {
        Self::from_port_var(std::env::var(PORT_ENV).ok().as_deref())
    }

    fn from_port_var(value: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = value {
            let port: u16 = raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid {} value: {:?}", PORT_ENV, raw)))?;
            config.bind_addr.set_port(port);
        }
        Ok(config)
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set maximum connections
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Set TCP_NODELAY
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }

    /// Set handshake timeout
    pub fn handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Set keepalive ping interval
    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.ping_interval = interval;
        self
    }

    /// Set idle timeout
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Enable or disable the `connected` greeting
    pub fn greet_on_connect(mut self, enabled: bool) -> Self {
        self.greet_on_connect = enabled;
        self
    }

    /// Set hub configuration
    pub fn hub(mut self, hub: HubConfig) -> Self {
        self.hub = hub;
        self
    }
}
