//! Kennywood itinerary planner API server

use anyhow::{Context, Result};
use clap::Parser;
use kennywood::config::AppConfig;
use kennywood::core::media::MediaStore;
use kennywood::entities::ParkModule;
use kennywood::server::{AppState, ServerBuilder};
use kennywood::storage::EntityStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kennywood-api")]
#[command(about = "Park areas, attractions and customer itineraries over a token-authenticated REST API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL (`memory` for the in-memory store)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_yaml_file(&path.to_string_lossy())?,
        None => AppConfig::default(),
    }
    .apply_overrides(|key| std::env::var(key).ok());

    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        bind_addr = %config.bind_addr,
        database_url = %config.database_url,
        media_root = %config.media_root.display(),
        "starting kennywood-api"
    );

    tokio::fs::create_dir_all(&config.media_root)
        .await
        .with_context(|| format!("cannot create media root {}", config.media_root.display()))?;

    let store = EntityStore::connect(&config.database_url).await?;
    let state = AppState::new(store, MediaStore::new(config.media_root.clone()));

    let mut builder = ServerBuilder::new()
        .with_state(state.clone())
        .with_allowed_origins(config.allowed_origins.clone())
        .register_module(ParkModule::new(state));

    if let Some(url) = &config.public_url {
        builder = builder.with_public_url(url.clone());
    }

    builder.serve(&config.bind_addr).await
}
