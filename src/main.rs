//! Edge request router.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                   EDGE ROUTER                     │
//!   Client Request   │  ┌─────────┐    ┌──────────┐    ┌──────────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ routing  │───▶│   request    │──┼──▶ primary origin (/)
//!                    │  │ server  │    │ resolve  │    │   forward    │──┼──▶ secondary origin (/painrelief)
//!                    │  └─────────┘    └──────────┘    └──────┬───────┘  │
//!                    │                                        │          │
//!   Client Response  │  ┌──────────────────────────┐          │          │
//!   ◀────────────────┼──│ response: redirect       │◀─────────┘          │
//!                    │  │ Location rewrite         │                     │
//!                    │  └──────────────────────────┘                     │
//!                    │                                                   │
//!                    │  config · observability · lifecycle               │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_router::config::{load_config, validate_config, ConfigError};
use edge_router::lifecycle::{shutdown_on_signal, Shutdown};
use edge_router::observability::init_logging;
use edge_router::RouterServer;

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Path-based edge router for two upstream origins", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "ROUTER_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file and ROUTER_BIND_ADDRESS.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!("edge-router v{} starting", env!("CARGO_PKG_VERSION"));

    let upstreams = validate_config(&config).map_err(|errors| {
        for error in &errors {
            tracing::error!(error = %error, "Invalid configuration");
        }
        ConfigError::Validation(errors)
    })?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = RouterServer::new(upstreams);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        shutdown_on_signal(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
