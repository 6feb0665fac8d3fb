//! Error types
//!
//! Crate-level error type. Routing failures have their own type in
//! [`crate::router::RouteError`]; they are logged at the hub boundary and
//! never surface here.

use std::fmt;
use std::io;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// Socket I/O failure
    Io(io::Error),
    /// WebSocket handshake or framing failure
    WebSocket(tokio_tungstenite::tungstenite::Error),
    /// A wire frame could not be decoded
    Codec(CodecError),
    /// Configuration value could not be used
    Config(String),
}

/// Errors decoding a wire frame into an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Text frame is not valid JSON
    InvalidJson(String),
    /// Text frame is JSON but not an `{event, data}` object
    MissingEventName,
    /// Binary frame is shorter than its declared header
    TruncatedBinary { declared: usize, available: usize },
    /// Event name inside a binary frame is not UTF-8
    InvalidEventName,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::WebSocket(e) => write!(f, "WebSocket error: {}", e),
            Error::Codec(e) => write!(f, "Codec error: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::WebSocket(e) => Some(e),
            Error::Codec(e) => Some(e),
            Error::Config(_) => None,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidJson(msg) => write!(f, "invalid JSON frame: {}", msg),
            CodecError::MissingEventName => write!(f, "frame has no event name"),
            CodecError::TruncatedBinary {
                declared,
                available,
            } => write!(
                f,
                "binary frame truncated: header declares {} bytes, {} available",
                declared, available
            ),
            CodecError::InvalidEventName => write!(f, "event name is not valid UTF-8"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(e)
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Error::Codec(e)
    }
}
