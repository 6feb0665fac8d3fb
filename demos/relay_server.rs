//! Relay server example
//!
//! Run with: cargo run --example relay_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example relay_server                  # binds to 0.0.0.0:$PORT or 0.0.0.0:10000
//!   cargo run --example relay_server localhost        # binds to 127.0.0.1:10000
//!   cargo run --example relay_server 127.0.0.1:9000   # binds to 127.0.0.1:9000
//!
//! ## Talking to the hub
//!
//! Every WebSocket frame is a JSON object `{"event": ..., "data": ...}`.
//!
//! Agent:
//!   {"event": "whoami", "data": {"hostname": "desk-42", "os": "linux"}}
//!   {"event": "frame", "data": "<base64 jpeg>"}
//!
//! Operator:
//!   {"event": "get_clients"}
//!   {"event": "get_directory", "data": {"client_id": "conn-1", "directory": "/tmp"}}

use std::net::SocketAddr;
use std::time::Duration;

use relay_hub::{RelayServer, ServerConfig};

/// Parse bind address from command line argument.
///
/// Accepts `IP:PORT`, a bare IP (default port) or `localhost`.
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, relay_hub::transport::config::DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: relay_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:$PORT, or 0.0.0.0:10000)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("relay_hub=debug".parse()?)
                .add_directive("relay_server=debug".parse()?),
        )
        .init();

    let mut config = ServerConfig::from_env()?;
    if let Some(addr_str) = args.get(1) {
        match parse_bind_addr(addr_str) {
            Ok(addr) => config = config.bind(addr),
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    println!("Starting relay hub on ws://{}", config.bind_addr);

    let server_limit = config.max_connections;
    let server = RelayServer::new(config);
    let hub = std::sync::Arc::clone(server.hub());
    tracing::info!(
        queue_capacity = hub.config().queue_capacity,
        max_connections = server_limit,
        "Hub configured"
    );

    // Periodic stats
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(30));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let stats = hub.stats();
            let registry = hub.registry().stats().await;
            tracing::info!(
                connections = stats.active_connections,
                peers = registry.peer_count,
                streaming = registry.streaming_count,
                events = stats.events_received,
                drop_rate = stats.drop_rate(),
                "Hub stats"
            );
        }
    });

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
            println!("\nShutting down...");
        })
        .await?;

    Ok(())
}
