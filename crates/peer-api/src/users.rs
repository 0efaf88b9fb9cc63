//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users` | Every parsed record; `?subject=` narrows by subject |
//! | `GET`  | `/users/:id` | 404 if not found |
//! | `GET`  | `/users/:id/contact` | Contact page: grade, days, links |
//! | `GET`  | `/users/:id/profile` | Editable [`ProfileDraft`] |
//! | `PUT`  | `/users/:id/profile` | Body: [`ProfileDraft`]; viewer must own the profile |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use peer_core::{
  matcher::filter_by_subject,
  profile::{ProfileDraft, SavedProfile},
  record::{ContactLink, UserRecord},
  store::DirectoryStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError, viewer::Viewer};

async fn load<S: DirectoryStore>(
  state: &ApiState<S>,
  id: &str,
) -> Result<UserRecord, ApiError> {
  state
    .store
    .get_user(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Keep only users offering or seeking this subject. `All` or blank keeps
  /// everyone.
  #[serde(default)]
  pub subject: Option<String>,
}

/// `GET /users[?subject=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<UserRecord>>, ApiError>
where
  S: DirectoryStore,
{
  let users = state.store.list_users().await.map_err(ApiError::store)?;
  let kept: Vec<UserRecord> = filter_by_subject(&users, params.subject.as_deref())
    .into_iter()
    .cloned()
    .collect();
  tracing::debug!(subject = ?params.subject, users = kept.len(), "list users");
  Ok(Json(kept))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<UserRecord>, ApiError>
where
  S: DirectoryStore,
{
  Ok(Json(load(&state, &id).await?))
}

// ─── Contact page ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
  pub id:             String,
  pub name:           String,
  pub grade:          String,
  pub available_days: Vec<String>,
  pub links:          Vec<ContactLink>,
}

/// `GET /users/:id/contact`
pub async fn contact<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<ContactPage>, ApiError>
where
  S: DirectoryStore,
{
  let user = load(&state, &id).await?;
  Ok(Json(ContactPage {
    links:          user.contact.links(),
    id:             user.id,
    name:           user.name,
    grade:          user.grade,
    available_days: user.available_days,
  }))
}

// ─── Profile ──────────────────────────────────────────────────────────────────

/// `GET /users/:id/profile`
pub async fn get_profile<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<ProfileDraft>, ApiError>
where
  S: DirectoryStore,
{
  let user = load(&state, &id).await?;
  Ok(Json(ProfileDraft::from_record(&user)))
}

/// `PUT /users/:id/profile`: normalizes the draft, merges it into the stored
/// document, and returns what was written.
pub async fn put_profile<S>(
  State(state): State<ApiState<S>>,
  viewer: Viewer,
  Path(id): Path<String>,
  Json(draft): Json<ProfileDraft>,
) -> Result<Json<SavedProfile>, ApiError>
where
  S: DirectoryStore,
{
  if viewer.id() != Some(id.as_str()) {
    return Err(ApiError::Forbidden(format!(
      "cannot edit the profile of user {id}"
    )));
  }

  let saved = draft.finalize();
  state
    .store
    .save_profile(&id, &saved)
    .await
    .map_err(ApiError::store)?;

  tracing::debug!(user_id = %id, role = %saved.role, "profile saved");
  Ok(Json(saved))
}
