//! Handler for `POST /sessions`, called first after an upstream sign-in.
//!
//! Rejects emails outside the configured domain and makes sure the user has a
//! directory document.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use peer_core::{identity::is_allowed_email, store::DirectoryStore};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SessionBody {
  /// The identity provider's stable user id.
  pub id:    String,
  #[serde(default)]
  pub name:  String,
  pub email: String,
}

/// `POST /sessions`: 201 if the user's document was created, 200 otherwise.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<SessionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore,
{
  let id = body.id.trim();
  if id.is_empty() {
    return Err(ApiError::BadRequest("id must not be blank".into()));
  }

  let domain = &state.config.allowed_domain;
  if !is_allowed_email(&body.email, domain) {
    tracing::warn!(user_id = %id, email = %body.email, "rejected sign-in");
    return Err(ApiError::Forbidden(format!(
      "only {domain} emails are allowed"
    )));
  }

  let created = state
    .store
    .ensure_user(id, body.name.trim(), body.email.trim())
    .await
    .map_err(ApiError::store)?;
  let user = state
    .store
    .get_user(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;

  tracing::debug!(user_id = %id, created, "session started");
  let status = if created { StatusCode::CREATED } else { StatusCode::OK };
  Ok((status, Json(user)))
}
