//! Forward proxy binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                FORWARD PROXY                  │
//!                    │                                               │
//!   Client Request   │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ─────────────────┼─▶│ listener │──▶│   http   │──▶│  proxy   │──┼──▶ Origin
//!                    │  │ (axum)   │   │  server  │   │ forward  │  │    Server
//!                    │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                    │                                     │        │
//!   Client Response  │                 ┌──────────┐        │        │
//!   ◀────────────────┼─────────────────│ streamed │◀───────┘        │
//!                    │                 │  relay   │                 │
//!                    │                 └──────────┘                 │
//!                    │                                              │
//!                    │  config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The caller names the full destination (scheme + host) in the request
//! target; the proxy forwards one request to that one origin and relays one
//! response. No routing table, no backend pool, no cross-request state.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use forward_proxy::config::{load_config, ProxyConfig};
use forward_proxy::http::HttpServer;
use forward_proxy::lifecycle::{signals, Shutdown};
use forward_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "forward-proxy")]
#[command(about = "Single-hop HTTP forwarding proxy", long_about = None)]
struct Args {
    /// Address to listen on (default 127.0.0.1:8080).
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(addr) = args.addr {
        config.listener.bind_address = addr;
    }

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        tls = config.listener.tls.is_some(),
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %config.listener.bind_address, "starting proxy server");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
