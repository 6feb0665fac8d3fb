//! WebSocket transport
//!
//! Reference transport for the hub: a TCP listener that upgrades every
//! connection to a WebSocket and speaks the JSON event framing understood by
//! the agents and viewers.

pub mod codec;
pub mod config;
pub mod connection;
pub mod listener;

pub use codec::InboundFrame;
pub use config::ServerConfig;
pub use listener::RelayServer;
