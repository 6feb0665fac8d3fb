//! Signaling hub for remote-desktop agents and operator viewers
//!
//! Agents stream screen frames and other telemetry; operators watch them and
//! send commands back. Every peer talks only to the hub, which keeps a
//! registry of identified peers and routes events between them.
//!
//! # Example
//!
//! ```no_run
//! use relay_hub::{RelayServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> relay_hub::Result<()> {
//!     let server = RelayServer::new(ServerConfig::from_env()?);
//!     server.run_until(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     }).await
//! }
//! ```
//!
//! The hub can also be driven without the WebSocket transport:
//!
//! ```
//! use relay_hub::{ConnectionId, Hub};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let hub = Hub::new();
//! let agent = ConnectionId::from("agent-1");
//! let mut rx = hub.connect(agent.clone()).await;
//!
//! hub.handle_event(&agent, "whoami", json!({"name": "desk-42"})).await;
//!
//! let announced = rx.try_recv().unwrap();
//! assert_eq!(announced.event, "client_connected");
//! # });
//! ```

pub mod error;
pub mod hub;
pub mod protocol;
pub mod registry;
pub mod router;
pub mod session;
pub mod stats;
pub mod transport;

pub use error::{Error, Result};
pub use hub::{Hub, HubConfig};
pub use protocol::{CommandEnvelope, OutboundMessage};
pub use registry::{ConnectionId, PeerRecord, PeerRegistry};
pub use router::{Action, RouteError, Router, RouterConfig};
pub use transport::{RelayServer, ServerConfig};
