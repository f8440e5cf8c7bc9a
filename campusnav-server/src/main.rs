//! HTTP API serving campus route queries from one shared model.

mod config;
mod error;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use campusnav_core::prelude::create_campus_model;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

#[derive(Debug, Parser)]
#[command(version, about = "Campus navigation HTTP server")]
struct Args {
    /// Server configuration file
    #[arg(short, long, default_value = "campusnav.toml")]
    config: PathBuf,
    /// Listen address, overrides `server.bind`
    #[arg(short, long)]
    bind: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    info!("Loading configuration from {}", args.config.display());
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let started = Instant::now();
    let model = create_campus_model(&config.model)?;
    info!(
        "{} built in {:.2?}",
        model.summary(),
        started.elapsed()
    );

    let app = routes::router(Arc::new(model), &config.server);
    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
