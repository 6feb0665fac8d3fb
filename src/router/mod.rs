//! Event router
//!
//! Turns one inbound `(connection, event, payload)` into registry updates and
//! a list of [`Action`]s for the hub to deliver.
//!
//! | Inbound | Registry | Outbound |
//! |---|---|---|
//! | `whoami` | add | broadcast `client_connected` |
//! | `frame` | update telemetry | broadcast `video_frame` |
//! | telemetry relays | none | broadcast relay event |
//! | targeted commands | none | `cmd` / `cmd_terminal_input` to `client_id` |
//! | `get_clients` | list | `clients_list` to the requester |
//! | disconnect | remove | broadcast `client_disconnected` |
//!
//! Every outbound body names the source by its connection id, never by
//! anything the peer claimed about itself.

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
mod payload;

pub use action::{Action, Recipients};
pub use config::RouterConfig;
pub use dispatch::Router;
pub use error::RouteError;
