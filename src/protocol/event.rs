//! Inbound event classification
//!
//! Maps wire event names (including the alternate spellings used by older
//! agents) onto a closed set of event kinds the router understands.

use super::constants::*;

/// Classified inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundKind {
    /// Peer announces its identity
    Identify,
    /// Screen frame telemetry
    Frame,
    /// Telemetry relayed to every peer without registry effect
    Relay(RelayKind),
    /// Operator command addressed to one agent
    Command(CommandKind),
    /// Presence snapshot request
    ListClients,
}

/// Telemetry events that are relayed verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    RecordFrame,
    RecordingEnded,
    StreamStatus,
    CommandResponse,
    TerminalOutput,
    FileExplorer,
    FileChunk,
    FileComplete,
    Info,
    Error,
    Warning,
}

/// Operator commands forwarded to a single agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    SendCommand,
    TerminalInput,
    ControlStreaming,
    SetFrameDelay,
    DesktopControl,
    FileOperation,
    GetDirectory,
}

impl InboundKind {
    /// Classify an event name, accepting both spellings where two exist
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            EV_WHOAMI => Self::Identify,
            EV_FRAME => Self::Frame,
            EV_GET_CLIENTS => Self::ListClients,

            EV_RECORD_FRAME | EV_RECORD_FRAME_ALT => Self::Relay(RelayKind::RecordFrame),
            EV_END_RECORD | EV_END_RECORD_ALT => Self::Relay(RelayKind::RecordingEnded),
            EV_STREAM_INFO | EV_STREAM_INFO_ALT => Self::Relay(RelayKind::StreamStatus),
            EV_CMD_RESPONSE | EV_CMD_RESPONSE_ALT => Self::Relay(RelayKind::CommandResponse),
            EV_TERMINAL_OUTPUT | EV_TERMINAL_OUTPUT_ALT => Self::Relay(RelayKind::TerminalOutput),
            EV_EXPLORER | EV_EXPLORER_ALT => Self::Relay(RelayKind::FileExplorer),
            EV_FILE_CHUNK => Self::Relay(RelayKind::FileChunk),
            EV_FILE_COMPLETE | EV_FILE_COMPLETE_ALT => Self::Relay(RelayKind::FileComplete),
            EV_INFO => Self::Relay(RelayKind::Info),
            EV_ERR | EV_ERR_ALT => Self::Relay(RelayKind::Error),
            EV_WARN | EV_WARN_ALT => Self::Relay(RelayKind::Warning),

            EV_SEND_COMMAND => Self::Command(CommandKind::SendCommand),
            EV_SEND_TERMINAL_COMMAND => Self::Command(CommandKind::TerminalInput),
            EV_CONTROL_STREAMING => Self::Command(CommandKind::ControlStreaming),
            EV_SET_FRAME_DELAY => Self::Command(CommandKind::SetFrameDelay),
            EV_DESKTOP_CONTROL => Self::Command(CommandKind::DesktopControl),
            EV_FILE_OPERATION => Self::Command(CommandKind::FileOperation),
            EV_GET_DIRECTORY => Self::Command(CommandKind::GetDirectory),

            _ => return None,
        };
        Some(kind)
    }

    /// Whether the payload is opaque media data rather than a structured value
    ///
    /// The transport leaves these payloads exactly as received (binary is
    /// base64-encoded) instead of trying to decode embedded JSON.
    pub fn carries_raw_payload(&self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Relay(RelayKind::RecordFrame) | Self::Relay(RelayKind::FileChunk)
        )
    }
}

impl RelayKind {
    /// Outbound event name the relay is broadcast under
    pub fn outbound_event(&self) -> &'static str {
        match self {
            Self::RecordFrame => OUT_RECORD_FRAME,
            Self::RecordingEnded => OUT_RECORDING_ENDED,
            Self::StreamStatus => OUT_STREAM_STATUS,
            Self::CommandResponse => OUT_COMMAND_RESPONSE,
            Self::TerminalOutput => OUT_TERMINAL_OUTPUT,
            Self::FileExplorer => OUT_FILE_EXPLORER,
            Self::FileChunk => OUT_FILE_CHUNK_RECEIVED,
            Self::FileComplete => OUT_FILE_DOWNLOAD_COMPLETE,
            Self::Info => OUT_CLIENT_INFO,
            Self::Error => OUT_CLIENT_ERROR,
            Self::Warning => OUT_CLIENT_WARNING,
        }
    }

    /// Body field the relayed payload is placed under
    pub fn payload_field(&self) -> &'static str {
        match self {
            Self::RecordFrame => "frame",
            Self::FileChunk => "chunk",
            Self::StreamStatus => "active",
            _ => "data",
        }
    }
}

impl CommandKind {
    /// Canonical inbound event name
    pub fn name(&self) -> &'static str {
        match self {
            Self::SendCommand => EV_SEND_COMMAND,
            Self::TerminalInput => EV_SEND_TERMINAL_COMMAND,
            Self::ControlStreaming => EV_CONTROL_STREAMING,
            Self::SetFrameDelay => EV_SET_FRAME_DELAY,
            Self::DesktopControl => EV_DESKTOP_CONTROL,
            Self::FileOperation => EV_FILE_OPERATION,
            Self::GetDirectory => EV_GET_DIRECTORY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_classify_identically() {
        let pairs = [
            (EV_RECORD_FRAME, EV_RECORD_FRAME_ALT),
            (EV_END_RECORD, EV_END_RECORD_ALT),
            (EV_STREAM_INFO, EV_STREAM_INFO_ALT),
            (EV_CMD_RESPONSE, EV_CMD_RESPONSE_ALT),
            (EV_TERMINAL_OUTPUT, EV_TERMINAL_OUTPUT_ALT),
            (EV_EXPLORER, EV_EXPLORER_ALT),
            (EV_FILE_COMPLETE, EV_FILE_COMPLETE_ALT),
            (EV_ERR, EV_ERR_ALT),
            (EV_WARN, EV_WARN_ALT),
        ];

        for (primary, alias) in pairs {
            let kind = InboundKind::from_name(primary);
            assert!(kind.is_some(), "{} not recognised", primary);
            assert_eq!(kind, InboundKind::from_name(alias), "{} != {}", primary, alias);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(InboundKind::from_name("connect"), None);
        assert_eq!(InboundKind::from_name("WHOAMI"), None);
        assert_eq!(InboundKind::from_name(""), None);
    }

    #[test]
    fn test_command_names_round_trip() {
        let kinds = [
            CommandKind::SendCommand,
            CommandKind::TerminalInput,
            CommandKind::ControlStreaming,
            CommandKind::SetFrameDelay,
            CommandKind::DesktopControl,
            CommandKind::FileOperation,
            CommandKind::GetDirectory,
        ];

        for kind in kinds {
            assert_eq!(
                InboundKind::from_name(kind.name()),
                Some(InboundKind::Command(kind))
            );
        }
    }

    #[test]
    fn test_raw_payload_events() {
        assert!(InboundKind::Frame.carries_raw_payload());
        assert!(InboundKind::Relay(RelayKind::FileChunk).carries_raw_payload());
        assert!(!InboundKind::Identify.carries_raw_payload());
        assert!(!InboundKind::Relay(RelayKind::TerminalOutput).carries_raw_payload());
    }

    #[test]
    fn test_relay_outbound_names() {
        assert_eq!(RelayKind::FileChunk.outbound_event(), "file_chunk_received");
        assert_eq!(RelayKind::Error.outbound_event(), "client_error");
        assert_eq!(RelayKind::FileChunk.payload_field(), "chunk");
        assert_eq!(RelayKind::Info.payload_field(), "data");
    }
}
