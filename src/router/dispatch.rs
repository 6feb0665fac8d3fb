//! Event routing
//!
//! Classifies every inbound event, applies its registry effect and decides
//! who hears about it.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::protocol::constants::*;
use crate::protocol::{CommandEnvelope, CommandKind, InboundKind, OutboundMessage, RelayKind};
use crate::registry::{ConnectionId, PeerRegistry};

use super::action::{Action, Recipients};
use super::config::RouterConfig;
use super::error::RouteError;
use super::payload::{as_object, present, required, required_str, scalar_to_string};

/// Routes inbound events to registry updates and outbound deliveries
///
/// Routing is per event and self-contained: the router holds no per-connection
/// state of its own, only the shared registry.
pub struct Router {
    registry: Arc<PeerRegistry>,
    config: RouterConfig,
}

impl Router {
    /// Create a router with default configuration
    pub fn new(registry: Arc<PeerRegistry>) -> Self {
        Self::with_config(registry, RouterConfig::default())
    }

    /// Create a router with custom configuration
    pub fn with_config(registry: Arc<PeerRegistry>, config: RouterConfig) -> Self {
        Self { registry, config }
    }

    /// Get the peer registry
    pub fn registry(&self) -> &Arc<PeerRegistry> {
        &self.registry
    }

    /// Route an inbound event by name
    pub async fn route(
        &self,
        source: &ConnectionId,
        event: &str,
        payload: Value,
    ) -> Result<Vec<Action>, RouteError> {
        let kind = InboundKind::from_name(event)
            .ok_or_else(|| RouteError::UnknownEvent(event.to_string()))?;

        self.route_kind(source, kind, payload).await
    }

    /// Route an already classified inbound event
    pub async fn route_kind(
        &self,
        source: &ConnectionId,
        kind: InboundKind,
        payload: Value,
    ) -> Result<Vec<Action>, RouteError> {
        match kind {
            InboundKind::Identify => self.on_identify(source, payload).await,
            InboundKind::Frame => self.on_frame(source, payload).await,
            InboundKind::Relay(relay) => Ok(self.on_relay(source, relay, payload).await),
            InboundKind::Command(command) => self.on_command(source, command, payload).await,
            InboundKind::ListClients => Ok(self.on_list_clients(source).await),
        }
    }

    /// Route the end of a connection
    ///
    /// Only a connection that had announced itself produces a presence
    /// update; disconnecting an unknown or already removed id yields nothing.
    pub async fn route_disconnect(&self, source: &ConnectionId) -> Vec<Action> {
        match self.registry.remove(source).await {
            Some(_) => vec![Action::broadcast(
                source,
                self.config.presence_recipients,
                OutboundMessage::new(OUT_CLIENT_DISCONNECTED, json!({ "sid": source })),
            )],
            None => Vec::new(),
        }
    }

    async fn on_identify(
        &self,
        source: &ConnectionId,
        identity: Value,
    ) -> Result<Vec<Action>, RouteError> {
        if identity.is_null() {
            return Err(RouteError::MalformedPayload {
                event: EV_WHOAMI,
                reason: "identity is empty",
            });
        }

        self.registry.add(source, identity.clone()).await;

        Ok(vec![Action::broadcast(
            source,
            self.config.presence_recipients,
            OutboundMessage::new(
                OUT_CLIENT_CONNECTED,
                json!({ "sid": source, "info": identity }),
            ),
        )])
    }

    async fn on_frame(&self, source: &ConnectionId, frame: Value) -> Result<Vec<Action>, RouteError> {
        if frame.is_null() {
            return Err(RouteError::MalformedPayload {
                event: EV_FRAME,
                reason: "frame is empty",
            });
        }

        self.registry
            .update_telemetry(source, frame.clone(), true)
            .await;

        Ok(vec![Action::broadcast(
            source,
            self.config.telemetry_recipients,
            OutboundMessage::new(OUT_VIDEO_FRAME, json!({ "client_id": source, "frame": frame })),
        )])
    }

    async fn on_relay(&self, source: &ConnectionId, relay: RelayKind, payload: Value) -> Vec<Action> {
        let value = match relay {
            RelayKind::StreamStatus => {
                let active = stream_active(&payload);
                self.registry.set_streaming(source, active).await;
                Value::Bool(active)
            }
            _ => payload,
        };

        let mut body = Map::new();
        body.insert("client_id".into(), Value::String(source.to_string()));
        body.insert(relay.payload_field().into(), value);

        tracing::trace!(conn = %source, event = relay.outbound_event(), "Relaying telemetry");

        vec![Action::broadcast(
            source,
            self.config.telemetry_recipients,
            OutboundMessage::new(relay.outbound_event(), Value::Object(body)),
        )]
    }

    async fn on_command(
        &self,
        source: &ConnectionId,
        command: CommandKind,
        payload: Value,
    ) -> Result<Vec<Action>, RouteError> {
        let event = command.name();
        let obj = as_object(event, &payload)?;
        let target = ConnectionId::from(required_str(event, obj, TARGET_FIELD)?);

        let message = match command {
            CommandKind::TerminalInput => {
                let cmd = required(event, obj, "command")?;
                OutboundMessage::new(
                    OUT_CMD_TERMINAL_INPUT,
                    json!({ "cmd": cmd, "by": source }),
                )
            }
            _ => {
                let envelope = build_envelope(source, command, obj)?;
                OutboundMessage::new(OUT_CMD, envelope.into_body(self.config.command_encoding))
            }
        };

        if !self.registry.contains(&target).await {
            return Err(RouteError::UnknownTarget { event, target });
        }

        tracing::info!(
            from = %source,
            to = %target,
            event,
            "Command forwarded"
        );

        Ok(vec![Action::send_to(target, message)])
    }

    async fn on_list_clients(&self, source: &ConnectionId) -> Vec<Action> {
        let clients: Map<String, Value> = self
            .registry
            .list_all()
            .await
            .into_iter()
            .map(|(id, identity)| (id.to_string(), identity))
            .collect();

        tracing::debug!(conn = %source, count = clients.len(), "Presence snapshot requested");

        vec![Action::send_to(
            source.clone(),
            OutboundMessage::new(OUT_CLIENTS_LIST, json!({ "clients": clients })),
        )]
    }
}

/// Normalize a targeted command into the agent command envelope
fn build_envelope(
    source: &ConnectionId,
    command: CommandKind,
    obj: &Map<String, Value>,
) -> Result<CommandEnvelope, RouteError> {
    let event = command.name();

    let envelope = match command {
        CommandKind::SendCommand => {
            let raw = required(event, obj, "command")?;
            // An envelope-shaped command (carrying `data` or `class`) is
            // unwrapped; any other typed command travels whole as its data.
            let envelope = match raw.get("type").and_then(Value::as_str) {
                Some(kind) if is_envelope_shaped(raw) => CommandEnvelope::new(
                    kind,
                    raw.get("data").cloned().unwrap_or(Value::Null),
                ),
                Some(kind) => CommandEnvelope::new(kind, raw.clone()),
                None => CommandEnvelope::new(CMD_TYPE_GENERIC, raw.clone()),
            };
            envelope.by(source)
        }
        CommandKind::ControlStreaming => {
            let situation = match present(obj, "enable") {
                Some(v) => scalar_to_string(v)
                    .ok_or(RouteError::MalformedPayload {
                        event,
                        reason: "enable must be a boolean",
                    })?
                    .to_lowercase(),
                None => "false".to_string(),
            };
            CommandEnvelope::new(
                CMD_TYPE_CONTROL_FEATURE,
                json!({ "feature": FEATURE_FRAME, "situation": situation }),
            )
        }
        CommandKind::SetFrameDelay => {
            let delay = match present(obj, "delay") {
                Some(v) => scalar_to_string(v).ok_or(RouteError::MalformedPayload {
                    event,
                    reason: "delay must be a number",
                })?,
                None => DEFAULT_FRAME_DELAY.to_string(),
            };
            CommandEnvelope::new(
                CMD_TYPE_CONTROL_FEATURE,
                json!({ "feature": FEATURE_FRAME_DELAY, "delay": delay }),
            )
        }
        CommandKind::DesktopControl => {
            let control = required(event, obj, "control_data")?;
            CommandEnvelope::new(CMD_TYPE_CONTROL_DESKTOP, control.clone())
        }
        CommandKind::FileOperation => {
            let operation = required_str(event, obj, "operation")?;
            let file_data = required(event, obj, "file_data")?;
            CommandEnvelope::new(operation, file_data.clone()).by(source)
        }
        CommandKind::GetDirectory => {
            let directory = required(event, obj, "directory")?;
            let back = obj.get("back").cloned().unwrap_or(Value::Bool(false));
            CommandEnvelope::new(
                CMD_TYPE_UPDATE_EXPLORER,
                json!({ "directory": directory, "back": back }),
            )
            .by(source)
        }
        CommandKind::TerminalInput => {
            return Err(RouteError::MalformedPayload {
                event,
                reason: "terminal input is not an envelope command",
            })
        }
    };

    Ok(envelope)
}

fn is_envelope_shaped(command: &Value) -> bool {
    command.get("data").is_some() || command.get("class").is_some()
}

/// Read the `active` flag of a stream status report
///
/// Agents nest it under `data`; a flat `active` is accepted as well.
fn stream_active(payload: &Value) -> bool {
    payload
        .pointer("/data/active")
        .or_else(|| payload.get("active"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn router_with(peers: &[&str]) -> Router {
        let registry = Arc::new(PeerRegistry::new());
        for id in peers {
            registry
                .add(&ConnectionId::from(*id), json!({ "name": id }))
                .await;
        }
        Router::new(registry)
    }

    fn only_send(actions: &[Action]) -> (&ConnectionId, &OutboundMessage) {
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::SendTo { target, message } => (target, message.as_ref()),
            other => panic!("expected SendTo, got {:?}", other),
        }
    }

    fn envelope_of(message: &OutboundMessage) -> CommandEnvelope {
        assert_eq!(message.event, "cmd");
        CommandEnvelope::from_body(&message.body).expect("cmd body is an envelope")
    }

    #[tokio::test]
    async fn test_whoami_registers_and_broadcasts() {
        let router = router_with(&[]).await;
        let c1 = ConnectionId::from("c1");

        let actions = router
            .route(&c1, "whoami", json!({ "name": "agent1" }))
            .await
            .unwrap();

        let record = router.registry().get(&c1).await.unwrap();
        assert_eq!(record.identity, json!({ "name": "agent1" }));
        assert_eq!(router.registry().peer_count().await, 1);

        assert_eq!(actions.len(), 1);
        assert!(actions[0].is_broadcast());
        assert_eq!(actions[0].message().event, "client_connected");
        assert_eq!(
            actions[0].message().body,
            json!({ "sid": "c1", "info": { "name": "agent1" } })
        );
    }

    #[tokio::test]
    async fn test_whoami_empty_identity_rejected() {
        let router = router_with(&[]).await;

        let result = router.route(&ConnectionId::from("c1"), "whoami", Value::Null).await;

        assert!(matches!(result, Err(RouteError::MalformedPayload { .. })));
        assert_eq!(router.registry().peer_count().await, 0);
    }

    #[tokio::test]
    async fn test_frame_tagged_with_connection_id() {
        let router = router_with(&[]).await;
        let a = ConnectionId::from("A");
        // Identity claims to be somebody else; routing must ignore it
        router
            .route(&a, "whoami", json!({ "sid": "B", "client_id": "B" }))
            .await
            .unwrap();

        let actions = router.route(&a, "frame", json!("aGVsbG8=")).await.unwrap();

        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::Broadcast { message, exclude } => {
                assert_eq!(message.event, "video_frame");
                assert_eq!(message.body, json!({ "client_id": "A", "frame": "aGVsbG8=" }));
                assert_eq!(*exclude, None);
            }
            other => panic!("expected broadcast, got {:?}", other),
        }

        let record = router.registry().get(&a).await.unwrap();
        assert!(record.streaming);
        assert_eq!(record.last_frame, Some(json!("aGVsbG8=")));
    }

    #[tokio::test]
    async fn test_frame_from_unidentified_peer_still_relayed() {
        let router = router_with(&[]).await;

        let actions = router
            .route(&ConnectionId::from("anon"), "frame", json!("data"))
            .await
            .unwrap();

        assert_eq!(actions.len(), 1);
        assert_eq!(router.registry().peer_count().await, 0);
    }

    #[tokio::test]
    async fn test_telemetry_without_echo_excludes_source() {
        let registry = Arc::new(PeerRegistry::new());
        let router = Router::with_config(registry, RouterConfig::default().echo_telemetry(false));
        let a = ConnectionId::from("A");

        let actions = router.route(&a, "frame", json!("x")).await.unwrap();

        assert!(matches!(
            &actions[0],
            Action::Broadcast { exclude: Some(id), .. } if *id == a
        ));
    }

    #[tokio::test]
    async fn test_relay_aliases_produce_same_event() {
        let router = router_with(&["a1"]).await;
        let a1 = ConnectionId::from("a1");

        let primary = router
            .route(&a1, "cmd_terminal_output", json!({ "output": "ls" }))
            .await
            .unwrap();
        let alias = router
            .route(&a1, "terminal_output", json!({ "output": "ls" }))
            .await
            .unwrap();

        assert_eq!(primary, alias);
        assert_eq!(primary[0].message().event, "terminal_output");
        assert_eq!(
            primary[0].message().body,
            json!({ "client_id": "a1", "data": { "output": "ls" } })
        );
    }

    #[tokio::test]
    async fn test_file_chunk_relay_field() {
        let router = router_with(&["a1"]).await;

        let actions = router
            .route(&ConnectionId::from("a1"), "file_chunk", json!("Y2h1bms="))
            .await
            .unwrap();

        assert_eq!(actions[0].message().event, "file_chunk_received");
        assert_eq!(
            actions[0].message().body,
            json!({ "client_id": "a1", "chunk": "Y2h1bms=" })
        );
    }

    #[tokio::test]
    async fn test_stream_info_updates_streaming() {
        let router = router_with(&["a1"]).await;
        let a1 = ConnectionId::from("a1");

        let actions = router
            .route(&a1, "stream-info", json!({ "data": { "active": true } }))
            .await
            .unwrap();
        assert_eq!(
            actions[0].message().body,
            json!({ "client_id": "a1", "active": true })
        );
        assert!(router.registry().get(&a1).await.unwrap().streaming);

        let actions = router.route(&a1, "stream_status", json!({})).await.unwrap();
        assert_eq!(actions[0].message().body["active"], json!(false));
        assert!(!router.registry().get(&a1).await.unwrap().streaming);
    }

    #[tokio::test]
    async fn test_send_command_wraps_envelope() {
        let router = router_with(&["c1"]).await;
        let op1 = ConnectionId::from("op1");

        let actions = router
            .route(
                &op1,
                "send_command",
                json!({
                    "client_id": "c1",
                    "command": { "class": "special", "type": "screenshot", "data": { "q": 80 } }
                }),
            )
            .await
            .unwrap();

        let (target, message) = only_send(&actions);
        assert_eq!(target.as_str(), "c1");
        let envelope = envelope_of(message);
        assert_eq!(envelope.class, "special");
        assert_eq!(envelope.kind, "screenshot");
        assert_eq!(envelope.data, json!({ "q": 80 }));
        assert_eq!(envelope.by, Some(op1));
    }

    #[tokio::test]
    async fn test_send_command_plain_value_wrapped_generic() {
        let router = router_with(&["c1"]).await;

        let actions = router
            .route(
                &ConnectionId::from("op1"),
                "send_command",
                json!({ "client_id": "c1", "command": "reboot" }),
            )
            .await
            .unwrap();

        let envelope = envelope_of(only_send(&actions).1);
        assert_eq!(envelope.kind, "command");
        assert_eq!(envelope.data, json!("reboot"));
    }

    #[tokio::test]
    async fn test_send_command_typed_keeps_arguments() {
        let router = router_with(&["c1"]).await;
        let command = json!({ "type": "download", "path": "/etc/hosts" });

        let actions = router
            .route(
                &ConnectionId::from("op1"),
                "send_command",
                json!({ "client_id": "c1", "command": command }),
            )
            .await
            .unwrap();

        let envelope = envelope_of(only_send(&actions).1);
        assert_eq!(envelope.kind, "download");
        assert_eq!(envelope.data, command);
        assert_eq!(envelope.data["path"], json!("/etc/hosts"));
        assert_eq!(envelope.by.as_ref().map(|b| b.as_str()), Some("op1"));
    }

    #[tokio::test]
    async fn test_relay_table() {
        let router = router_with(&["a1"]).await;
        let a1 = ConnectionId::from("a1");
        let payload = json!({ "n": 1 });

        // (inbound names, outbound event, body field)
        let table: [(&[&str], &str, &str); 10] = [
            (&["record-frame", "recording_frame"], "record_frame", "frame"),
            (&["end-record", "recording_ended"], "recording_ended", "data"),
            (&["cmd-response", "command_result"], "command_response", "data"),
            (&["cmd_terminal_output", "terminal_output"], "terminal_output", "data"),
            (&["explorer", "file_explorer"], "file_explorer", "data"),
            (&["file_chunk"], "file_chunk_received", "chunk"),
            (&["file_complete", "file_download_complete"], "file_download_complete", "data"),
            (&["info"], "client_info", "data"),
            (&["err", "client_error"], "client_error", "data"),
            (&["warn", "client_warning"], "client_warning", "data"),
        ];

        for (names, outbound, field) in table {
            for name in names {
                let actions = router.route(&a1, name, payload.clone()).await.unwrap();

                assert_eq!(actions.len(), 1, "{}", name);
                assert!(actions[0].is_broadcast(), "{}", name);
                assert_eq!(actions[0].message().event, outbound, "{}", name);
                let mut expected = Map::new();
                expected.insert("client_id".into(), json!("a1"));
                expected.insert(field.into(), payload.clone());
                assert_eq!(actions[0].message().body, Value::Object(expected), "{}", name);
            }
        }

        for name in ["stream-info", "stream_status"] {
            let actions = router
                .route(&a1, name, json!({ "data": { "active": true } }))
                .await
                .unwrap();
            assert_eq!(actions[0].message().event, "stream_status", "{}", name);
            assert_eq!(
                actions[0].message().body,
                json!({ "client_id": "a1", "active": true }),
                "{}",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_get_directory_envelope() {
        let router = router_with(&["c1"]).await;

        let actions = router
            .route(
                &ConnectionId::from("op1"),
                "get_directory",
                json!({ "client_id": "c1", "directory": "/tmp", "back": false }),
            )
            .await
            .unwrap();

        let (target, message) = only_send(&actions);
        assert_eq!(target.as_str(), "c1");
        let envelope = envelope_of(message);
        assert_eq!(envelope.kind, "updateExpItems");
        assert_eq!(envelope.data, json!({ "directory": "/tmp", "back": false }));
        assert_eq!(envelope.by.as_ref().map(|b| b.as_str()), Some("op1"));
    }

    #[tokio::test]
    async fn test_control_streaming_situation() {
        let router = router_with(&["c1"]).await;
        let op = ConnectionId::from("op1");

        let on = router
            .route(&op, "control_streaming", json!({ "client_id": "c1", "enable": true }))
            .await
            .unwrap();
        let off = router
            .route(&op, "control_streaming", json!({ "client_id": "c1" }))
            .await
            .unwrap();

        let on = envelope_of(only_send(&on).1);
        assert_eq!(on.kind, "control-feature");
        assert_eq!(on.data, json!({ "feature": "frame", "situation": "true" }));
        assert_eq!(on.by, None);
        let off = envelope_of(only_send(&off).1);
        assert_eq!(off.data["situation"], json!("false"));
    }

    #[tokio::test]
    async fn test_set_frame_delay_default_and_explicit() {
        let router = router_with(&["c1"]).await;
        let op = ConnectionId::from("op1");

        let default = router
            .route(&op, "set_frame_delay", json!({ "client_id": "c1" }))
            .await
            .unwrap();
        let explicit = router
            .route(&op, "set_frame_delay", json!({ "client_id": "c1", "delay": 0.5 }))
            .await
            .unwrap();

        assert_eq!(
            envelope_of(only_send(&default).1).data,
            json!({ "feature": "frame-delay", "delay": "0.1" })
        );
        assert_eq!(envelope_of(only_send(&explicit).1).data["delay"], json!("0.5"));
    }

    #[tokio::test]
    async fn test_desktop_control_and_file_operation() {
        let router = router_with(&["c1"]).await;
        let op = ConnectionId::from("op1");

        let desktop = router
            .route(
                &op,
                "desktop_control",
                json!({ "client_id": "c1", "control_data": { "action": "click", "x": 10, "y": 20 } }),
            )
            .await
            .unwrap();
        let desktop = envelope_of(only_send(&desktop).1);
        assert_eq!(desktop.kind, "control-desktop");
        assert_eq!(desktop.data["action"], json!("click"));

        let file = router
            .route(
                &op,
                "file_operation",
                json!({ "client_id": "c1", "operation": "delete", "file_data": { "path": "/tmp/x" } }),
            )
            .await
            .unwrap();
        let file = envelope_of(only_send(&file).1);
        assert_eq!(file.kind, "delete");
        assert_eq!(file.data, json!({ "path": "/tmp/x" }));
        assert_eq!(file.by, Some(op));
    }

    #[tokio::test]
    async fn test_terminal_input_keeps_wire_shape() {
        let router = router_with(&["c1"]).await;

        let actions = router
            .route(
                &ConnectionId::from("op1"),
                "send_terminal_command",
                json!({ "client_id": "c1", "command": "whoami" }),
            )
            .await
            .unwrap();

        let (target, message) = only_send(&actions);
        assert_eq!(target.as_str(), "c1");
        assert_eq!(message.event, "cmd_terminal_input");
        assert_eq!(message.body, json!({ "cmd": "whoami", "by": "op1" }));
    }

    #[tokio::test]
    async fn test_object_encoding() {
        let registry = Arc::new(PeerRegistry::new());
        registry.add(&ConnectionId::from("c1"), json!({})).await;
        let router = Router::with_config(
            registry,
            RouterConfig::default().command_encoding(crate::protocol::CommandEncoding::Object),
        );

        let actions = router
            .route(
                &ConnectionId::from("op1"),
                "desktop_control",
                json!({ "client_id": "c1", "control_data": { "k": "a" } }),
            )
            .await
            .unwrap();

        assert_eq!(
            only_send(&actions).1.body,
            json!({ "class": "special", "type": "control-desktop", "data": { "k": "a" } })
        );
    }

    #[tokio::test]
    async fn test_command_without_target_dropped() {
        let router = router_with(&["c1"]).await;

        let result = router
            .route(&ConnectionId::from("op1"), "send_command", json!({ "command": { "type": "x" } }))
            .await;

        assert_eq!(
            result,
            Err(RouteError::MissingField {
                event: "send_command",
                field: "client_id"
            })
        );
    }

    #[tokio::test]
    async fn test_command_missing_argument_dropped() {
        let router = router_with(&["c1"]).await;
        let op = ConnectionId::from("op1");

        let cases = [
            ("send_command", json!({ "client_id": "c1" })),
            ("desktop_control", json!({ "client_id": "c1", "control_data": {} })),
            ("file_operation", json!({ "client_id": "c1", "operation": "delete" })),
            ("get_directory", json!({ "client_id": "c1", "directory": "" })),
            ("send_terminal_command", json!({ "client_id": "c1", "command": null })),
        ];

        for (event, payload) in cases {
            let result = router.route(&op, event, payload).await;
            assert!(
                matches!(result, Err(RouteError::MissingField { .. })),
                "{} should be rejected, got {:?}",
                event,
                result
            );
        }
    }

    #[tokio::test]
    async fn test_command_non_object_payload() {
        let router = router_with(&["c1"]).await;

        let result = router
            .route(&ConnectionId::from("op1"), "get_directory", json!("c1"))
            .await;

        assert!(matches!(result, Err(RouteError::MalformedPayload { .. })));
    }

    #[tokio::test]
    async fn test_command_to_unknown_target() {
        let router = router_with(&["c1"]).await;

        let result = router
            .route(
                &ConnectionId::from("op1"),
                "send_command",
                json!({ "client_id": "ghost", "command": { "type": "x" } }),
            )
            .await;

        assert_eq!(
            result,
            Err(RouteError::UnknownTarget {
                event: "send_command",
                target: ConnectionId::from("ghost")
            })
        );
    }

    #[tokio::test]
    async fn test_get_clients_replies_to_requester_only() {
        let router = router_with(&["c1", "c2"]).await;
        let op = ConnectionId::from("op1");

        let actions = router.route(&op, "get_clients", Value::Null).await.unwrap();

        let (target, message) = only_send(&actions);
        assert_eq!(*target, op);
        assert_eq!(message.event, "clients_list");
        assert_eq!(
            message.body,
            json!({ "clients": { "c1": { "name": "c1" }, "c2": { "name": "c2" } } })
        );
    }

    #[tokio::test]
    async fn test_disconnect_once() {
        let router = router_with(&["c1"]).await;
        let c1 = ConnectionId::from("c1");

        let first = router.route_disconnect(&c1).await;
        let second = router.route_disconnect(&c1).await;

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].message().event, "client_disconnected");
        assert_eq!(first[0].message().body, json!({ "sid": "c1" }));
        assert!(second.is_empty());
        assert_eq!(router.registry().peer_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_event() {
        let router = router_with(&[]).await;

        let result = router.route(&ConnectionId::from("c1"), "connect", Value::Null).await;

        assert_eq!(result, Err(RouteError::UnknownEvent("connect".into())));
        assert!(!result.unwrap_err().is_peer_fault());
    }
}
