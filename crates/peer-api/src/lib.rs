//! JSON REST API for the peer directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`peer_core::store::DirectoryStore`]. Authentication and TLS are the
//! caller's responsibility; the signed-in user is identified by the
//! [`viewer::VIEWER_HEADER`] header.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", peer_api::api_router(store.clone(), config))
//! ```

pub mod catalog;
pub mod error;
pub mod matches;
pub mod sessions;
pub mod subjects;
pub mod users;
pub mod viewer;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use peer_core::{identity::DEFAULT_ALLOWED_DOMAIN, store::DirectoryStore};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Settings the API needs from the server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Only emails under this domain may sign in.
  #[serde(default = "default_allowed_domain")]
  pub allowed_domain: String,
}

fn default_allowed_domain() -> String { DEFAULT_ALLOWED_DOMAIN.to_owned() }

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      allowed_domain: default_allowed_domain(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ApiConfig>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, config: ApiConfig) -> Router<()>
where
  S: DirectoryStore + 'static,
{
  let state = ApiState {
    store,
    config: Arc::new(config),
  };

  Router::new()
    // Catalog
    .route("/catalog", get(catalog::handler))
    // Sign-in
    .route("/sessions", post(sessions::create::<S>))
    // Subject index
    .route("/subjects", get(subjects::handler::<S>))
    // Users
    .route("/users", get(users::list::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    .route("/users/{id}/contact", get(users::contact::<S>))
    .route(
      "/users/{id}/profile",
      get(users::get_profile::<S>).put(users::put_profile::<S>),
    )
    // Matches
    .route("/matches/tutors", get(matches::tutors::<S>))
    .route("/matches/learners", get(matches::learners::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests;
