//! Router configuration

use crate::protocol::CommandEncoding;

use super::action::Recipients;

/// Router configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Recipients of presence updates (`client_connected`, `client_disconnected`)
    pub presence_recipients: Recipients,

    /// Recipients of telemetry relays (`video_frame`, `terminal_output`, ...)
    pub telemetry_recipients: Recipients,

    /// How `cmd` envelopes are encoded
    pub command_encoding: CommandEncoding,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            presence_recipients: Recipients::All,
            telemetry_recipients: Recipients::All,
            command_encoding: CommandEncoding::JsonString,
        }
    }
}

impl RouterConfig {
    /// Choose whether agents receive their own telemetry back
    pub fn echo_telemetry(mut self, echo: bool) -> Self {
        self.telemetry_recipients = if echo {
            Recipients::All
        } else {
            Recipients::AllExceptSource
        };
        self
    }

    /// Set the recipients of presence updates
    pub fn presence_recipients(mut self, recipients: Recipients) -> Self {
        self.presence_recipients = recipients;
        self
    }

    /// Set the command envelope encoding
    pub fn command_encoding(mut self, encoding: CommandEncoding) -> Self {
        self.command_encoding = encoding;
        self
    }
}
