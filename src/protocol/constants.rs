//! Event names and fixed wire values
//!
//! These strings are the compatibility contract with deployed agents and
//! viewers and must not change.

// Inbound: identity and registry queries
pub const EV_WHOAMI: &str = "whoami";
pub const EV_GET_CLIENTS: &str = "get_clients";

// Inbound: telemetry from agents (primary name, alias)
pub const EV_FRAME: &str = "frame";
pub const EV_RECORD_FRAME: &str = "record-frame";
pub const EV_RECORD_FRAME_ALT: &str = "recording_frame";
pub const EV_END_RECORD: &str = "end-record";
pub const EV_END_RECORD_ALT: &str = "recording_ended";
pub const EV_STREAM_INFO: &str = "stream-info";
pub const EV_STREAM_INFO_ALT: &str = "stream_status";
pub const EV_CMD_RESPONSE: &str = "cmd-response";
pub const EV_CMD_RESPONSE_ALT: &str = "command_result";
pub const EV_TERMINAL_OUTPUT: &str = "cmd_terminal_output";
pub const EV_TERMINAL_OUTPUT_ALT: &str = "terminal_output";
pub const EV_EXPLORER: &str = "explorer";
pub const EV_EXPLORER_ALT: &str = "file_explorer";
pub const EV_FILE_CHUNK: &str = "file_chunk";
pub const EV_FILE_COMPLETE: &str = "file_complete";
pub const EV_FILE_COMPLETE_ALT: &str = "file_download_complete";
pub const EV_INFO: &str = "info";
pub const EV_ERR: &str = "err";
pub const EV_ERR_ALT: &str = "client_error";
pub const EV_WARN: &str = "warn";
pub const EV_WARN_ALT: &str = "client_warning";

// Inbound: targeted commands from operators
pub const EV_SEND_COMMAND: &str = "send_command";
pub const EV_SEND_TERMINAL_COMMAND: &str = "send_terminal_command";
pub const EV_CONTROL_STREAMING: &str = "control_streaming";
pub const EV_SET_FRAME_DELAY: &str = "set_frame_delay";
pub const EV_DESKTOP_CONTROL: &str = "desktop_control";
pub const EV_FILE_OPERATION: &str = "file_operation";
pub const EV_GET_DIRECTORY: &str = "get_directory";

// Outbound
pub const OUT_CONNECTED: &str = "connected";
pub const OUT_CLIENT_CONNECTED: &str = "client_connected";
pub const OUT_CLIENT_DISCONNECTED: &str = "client_disconnected";
pub const OUT_VIDEO_FRAME: &str = "video_frame";
pub const OUT_RECORD_FRAME: &str = "record_frame";
pub const OUT_RECORDING_ENDED: &str = "recording_ended";
pub const OUT_STREAM_STATUS: &str = "stream_status";
pub const OUT_COMMAND_RESPONSE: &str = "command_response";
pub const OUT_TERMINAL_OUTPUT: &str = "terminal_output";
pub const OUT_FILE_EXPLORER: &str = "file_explorer";
pub const OUT_FILE_CHUNK_RECEIVED: &str = "file_chunk_received";
pub const OUT_FILE_DOWNLOAD_COMPLETE: &str = "file_download_complete";
pub const OUT_CLIENT_INFO: &str = "client_info";
pub const OUT_CLIENT_ERROR: &str = "client_error";
pub const OUT_CLIENT_WARNING: &str = "client_warning";
pub const OUT_CMD: &str = "cmd";
pub const OUT_CMD_TERMINAL_INPUT: &str = "cmd_terminal_input";
pub const OUT_CLIENTS_LIST: &str = "clients_list";

// Command envelope
pub const ENVELOPE_CLASS: &str = "special";
pub const CMD_TYPE_GENERIC: &str = "command";
pub const CMD_TYPE_CONTROL_FEATURE: &str = "control-feature";
pub const CMD_TYPE_CONTROL_DESKTOP: &str = "control-desktop";
pub const CMD_TYPE_UPDATE_EXPLORER: &str = "updateExpItems";
pub const FEATURE_FRAME: &str = "frame";
pub const FEATURE_FRAME_DELAY: &str = "frame-delay";

/// Frame delay applied when `set_frame_delay` names none (seconds)
pub const DEFAULT_FRAME_DELAY: f64 = 0.1;

/// Field naming the target connection of a targeted command
pub const TARGET_FIELD: &str = "client_id";
