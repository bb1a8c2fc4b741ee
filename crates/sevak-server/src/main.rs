//! sevak server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the volunteer-registry JSON API
//! over HTTP. Settings can also come from `SEVAK_*` environment variables,
//! e.g. `SEVAK_ADMIN_SECRET` or `SEVAK_PORT`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;
use sevak_api::AppState;
use sevak_core::{auth::StaticSecret, image::ImageStore};
use sevak_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Sevak volunteer registry server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:         String,
  port:         u16,
  store_path:   PathBuf,
  admin_secret: String,
}

/// Stand-in for the external image host: releases are logged and dropped.
///
/// The registry only ever stores URLs; wiring a real blob store means
/// substituting this one implementation.
#[derive(Clone)]
struct NullImageStore;

impl ImageStore for NullImageStore {
  async fn upload(&self, _bytes: Vec<u8>) -> sevak_core::Result<String> {
    Err(sevak_core::Error::storage("no image host configured"))
  }

  async fn delete(&self, url: &str) -> sevak_core::Result<()> {
    tracing::debug!(%url, "image release skipped: no image host configured");
    Ok(())
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SEVAK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  if server_cfg.admin_secret.is_empty() {
    tracing::warn!("admin_secret is empty; all admin requests will be denied");
  }

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Build application state.
  let state = AppState {
    store:  Arc::new(store),
    images: Arc::new(NullImageStore),
    auth:   Arc::new(StaticSecret::new(server_cfg.admin_secret.clone())),
  };

  let app = sevak_api::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
