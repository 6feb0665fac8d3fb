//! Signaling hub
//!
//! Wires the registry and router to live connections. The transport owns the
//! sockets; the hub owns one bounded outbound queue per connection and never
//! waits on any of them.
//!
//! # Delivery
//!
//! ```text
//!   reader task ──► Hub::handle_event ──► Router ──► Vec<Action>
//!                                                        │
//!                 ┌──────────────────────────────────────┘
//!                 ▼
//!        ConnectionTable (snapshot of senders, lock released)
//!                 │ try_send(Arc<OutboundMessage>)
//!       ┌─────────┼─────────┐
//!       ▼         ▼         ▼
//!    queue A   queue B   queue C ──► writer tasks
//! ```
//!
//! A full queue drops the message for that connection only. A closed queue
//! means the writer is gone; the connection is disconnected on the spot and
//! its departure announced like any other.

pub mod config;
pub mod relay;
pub mod table;

pub use config::{HubConfig, DEFAULT_QUEUE_CAPACITY};
pub use relay::Hub;
pub use table::{ConnectionTable, OutboundSender};
