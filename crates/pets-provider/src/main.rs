//! Pets provider service
//!
//! # Usage
//!
//! ```bash
//! ./pets-provider --config config/fishes.toml
//! ./pets-provider --config config/dogs.toml --port 9002 --verbose
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pets_provider::{create_router, ProviderConfig};

#[derive(Parser, Debug)]
#[command(name = "pets-provider")]
#[command(about = "Demo pets provider with fault injection")]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "pets_provider=debug"
    } else {
        "pets_provider=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            ProviderConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => ProviderConfig::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    info!(
        name = %config.name,
        port = config.port,
        items = config.pets.len(),
        "Starting pets provider"
    );

    let app = create_router(&config);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Provider stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
