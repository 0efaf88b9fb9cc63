//! peer-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! directory store, optionally seeds it from a JSON export, and serves the
//! API over HTTP.
//!
//! # Seeding
//!
//! The export is a single JSON object mapping user ids to their documents:
//!
//! ```text
//! cargo run -p peer-server -- --import users.json
//! ```

mod settings;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use peer_core::store::DirectoryStore;
use peer_store_sqlite::SqliteStore;
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Peer tutoring directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Import user documents from a JSON export before serving.
  #[arg(long)]
  import: Option<PathBuf>,
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
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent() {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if let Some(path) = &cli.import {
    let count = import_export(&store, path).await?;
    tracing::info!(count, "imported user documents from {path:?}");
  }

  let app = Router::new()
    .nest("/api", peer_api::api_router(Arc::new(store), server_cfg.api()))
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Load `{ "<id>": { ...document... }, ... }` into the store.
async fn import_export(store: &SqliteStore, path: &Path) -> anyhow::Result<usize> {
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read {path:?}"))?;
  let docs: Map<String, Value> = serde_json::from_str(&raw)
    .with_context(|| format!("{path:?} is not a JSON object of documents"))?;

  let count = docs.len();
  for (id, doc) in docs {
    store
      .import_document(&id, doc)
      .await
      .with_context(|| format!("failed to import user {id}"))?;
  }
  Ok(count)
}
