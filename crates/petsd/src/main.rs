//! petsd - pets gateway daemon
//!
//! Aggregates the collections of every configured provider behind one
//! REST endpoint.
//!
//! Usage:
//!   petsd [OPTIONS] [pets_config.toml]
//!
//! Without a path the configuration is looked up in `$SERVICE_CONFIG_DIR`,
//! then next to the executable.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pets_api::{create_router, AppState};
use pets_client::PetClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str = "petsd=info,pets_api=info,pets_gateway=info,pets_client=info";

#[derive(Parser, Debug)]
#[command(name = "petsd")]
#[command(about = "Pets gateway daemon")]
struct Args {
    /// Configuration file (TOML)
    config: Option<PathBuf>,

    /// Listen port, overrides the config file
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    tracing::info!("Starting petsd (pets gateway daemon)");

    let path = config::locate(args.config.as_deref());
    tracing::info!("Loading config from: {}", path.display());
    let mut config = Config::load_or_default(&path)?;
    if let Some(port) = args.port {
        config.service.port = port;
    }

    if !config.service.listen {
        tracing::info!("Listening disabled in configuration, exiting");
        return Ok(());
    }

    let client = PetClient::new().context("Failed to create HTTP client")?;
    let state = AppState::from_backends(
        config.gateway_settings(),
        config.backends.clone(),
        Arc::new(client),
        config.observability.enable,
    );
    tracing::info!(
        backends = config.backends.len(),
        route = %config.service.route,
        tracing = config.observability.enable,
        "Gateway configured"
    );

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.service.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
