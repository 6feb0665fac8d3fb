//! Per-connection handler
//!
//! Upgrades the socket to a WebSocket, then runs a reader loop feeding the
//! hub and a writer task draining the connection's outbound queue.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::error::{CodecError, Error, Result};
use crate::hub::Hub;
use crate::protocol::SharedMessage;
use crate::registry::ConnectionId;

use super::codec::{self, InboundFrame};
use super::config::ServerConfig;

/// Time the writer gets to flush and close after the reader stops
const CLOSE_GRACE: Duration = Duration::from_secs(2);

type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;

/// One accepted client connection
pub struct Connection {
    id: ConnectionId,
    socket: TcpStream,
    peer_addr: SocketAddr,
    config: ServerConfig,
    hub: Arc<Hub>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        socket: TcpStream,
        peer_addr: SocketAddr,
        config: ServerConfig,
        hub: Arc<Hub>,
    ) -> Self {
        Self {
            id,
            socket,
            peer_addr,
            config,
            hub,
        }
    }

    /// Serve the connection until the peer goes away
    ///
    /// The hub always sees a matching disconnect for every connect, whatever
    /// ends the connection.
    pub async fn run(self) -> Result<()> {
        let Self {
            id,
            socket,
            peer_addr,
            config,
            hub,
        } = self;

        let ws = match tokio::time::timeout(
            config.handshake_timeout,
            tokio_tungstenite::accept_async(socket),
        )
        .await
        {
            Ok(ws) => ws?,
            Err(_) => {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "WebSocket handshake timed out",
                )))
            }
        };

        let (mut sink, mut stream) = ws.split();

        let rx = hub.connect(id.clone()).await;
        tracing::info!(conn = %id, peer = %peer_addr, "Peer connected");

        // Hub traffic waits in the queue until the writer starts
        if config.greet_on_connect {
            let sent = match codec::encode(&codec::greeting()) {
                Ok(greeting) => sink.send(Message::text(greeting)).await.map_err(Error::from),
                Err(e) => Err(e.into()),
            };
            if let Err(e) = sent {
                hub.disconnect(&id).await;
                return Err(e);
            }
        }

        let mut writer = tokio::spawn(write_loop(id.clone(), sink, rx, config.ping_interval));

        let mut result = Ok(());
        loop {
            let next = if config.idle_timeout.is_zero() {
                stream.next().await
            } else {
                match tokio::time::timeout(config.idle_timeout, stream.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tracing::debug!(conn = %id, "Idle timeout");
                        break;
                    }
                }
            };

            let message = match next {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    result = Err(e.into());
                    break;
                }
                None => break,
            };

            let decoded = match message {
                Message::Text(text) => codec::decode_text(text.as_str()),
                Message::Binary(data) => codec::decode_binary(data),
                Message::Close(_) => break,
                // Pongs are answered by tungstenite; pings only refresh the idle timer
                _ => continue,
            };

            match decoded {
                Ok(InboundFrame { event, payload }) => {
                    hub.handle_event(&id, &event, payload).await;
                }
                Err(e) => log_bad_frame(&id, &e),
            }
        }

        hub.disconnect(&id).await;
        tracing::info!(conn = %id, peer = %peer_addr, "Peer disconnected");

        if tokio::time::timeout(CLOSE_GRACE, &mut writer).await.is_err() {
            writer.abort();
        }

        result
    }
}

/// Drain the outbound queue onto the socket
///
/// Ends when the hub drops the queue or the socket stops accepting writes;
/// in the second case the closed queue tells the hub the peer is gone.
async fn write_loop(
    id: ConnectionId,
    mut sink: WsSink,
    mut rx: mpsc::Receiver<SharedMessage>,
    ping_interval: Duration,
) {
    let pinging = !ping_interval.is_zero();
    let period = if pinging {
        ping_interval
    } else {
        Duration::from_secs(3600)
    };
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            message = rx.recv() => {
                let Some(message) = message else {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                };
                let text = match codec::encode(&message) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(conn = %id, event = message.event, error = %e, "Failed to encode message");
                        continue;
                    }
                };
                if let Err(e) = sink.send(Message::text(text)).await {
                    tracing::debug!(conn = %id, error = %e, "Write failed");
                    break;
                }
            }
            _ = ticker.tick(), if pinging => {
                if let Err(e) = sink.send(Message::Ping(Bytes::new())).await {
                    tracing::debug!(conn = %id, error = %e, "Ping failed");
                    break;
                }
            }
        }
    }

    // Dropping the receiver closes the queue for the hub
    drop(rx);
}

fn log_bad_frame(id: &ConnectionId, error: &CodecError) {
    tracing::warn!(conn = %id, error = %error, "Malformed frame skipped");
}
