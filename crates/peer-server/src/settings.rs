//! Runtime server configuration.
//!
//! Layered from an optional TOML file and `PEER_`-prefixed environment
//! variables (e.g. `PEER_PORT=8080`). Every field has a default.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use peer_api::ApiConfig;
use peer_core::identity::DEFAULT_ALLOWED_DOMAIN;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Only emails under this domain may sign in.
  #[serde(default = "default_allowed_domain")]
  pub allowed_domain: String,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/peer/directory.db") }

fn default_allowed_domain() -> String { DEFAULT_ALLOWED_DOMAIN.to_owned() }

impl ServerConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PEER"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn api(&self) -> ApiConfig {
    ApiConfig {
      allowed_domain: self.allowed_domain.clone(),
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
