//! Caravel admin shell
//!
//! HTTP server for the admin dashboard and resource pages.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use caravel_kernel::routes;
use caravel_kernel::{AppState, Config};

/// Command-line overrides for the environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the admin configuration file (overrides CARAVEL_CONFIG).
    #[arg(long)]
    config: Option<PathBuf>,

    /// HTTP port (overrides PORT).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    info!("Starting Caravel admin");

    let config = Config::from_env(args.port, args.config)
        .context("failed to load configuration")?;
    info!(
        port = config.port,
        path = %config.config_path.display(),
        "Configuration loaded"
    );

    let state = AppState::new(&config.admin).context("failed to initialize application state")?;

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
