//! Peer registry
//!
//! The registry owns one [`PeerRecord`] per identified connection. Records are
//! created when a peer announces itself, updated by that peer's telemetry,
//! and removed when its connection goes away.
//!
//! # Architecture
//!
//! ```text
//!                      Arc<PeerRegistry>
//!                 ┌─────────────────────────┐
//!                 │ peers: HashMap<         │
//!                 │   ConnectionId,         │
//!                 │   PeerRecord {          │
//!                 │     identity,           │
//!                 │     last_frame,         │
//!                 │     streaming,          │
//!                 │   }                     │
//!                 │ >                       │
//!                 └───────────┬─────────────┘
//!                             │ add / remove / update_telemetry
//!                             │ get / list_all (copies)
//!                             ▼
//!                          Router
//! ```
//!
//! Reads never hand out references into the map; every lookup copies what it
//! needs before the lock is released.

pub mod entry;
pub mod id;
pub mod store;

pub use entry::{PeerRecord, RegistryStats};
pub use id::ConnectionId;
pub use store::PeerRegistry;
