//! Connection identifiers
//!
//! The transport assigns one identifier per accepted connection. Identifiers
//! are opaque to the hub: they are only compared, hashed and echoed back to
//! peers as routing addresses.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a live connection
///
/// Unique among live connections and never reused while the connection is
/// open. Every outbound message is tagged with the source connection's id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create an identifier from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the n-th accepted connection
    pub fn sequential(n: u64) -> Self {
        Self(format!("conn-{}", n))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ConnectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
