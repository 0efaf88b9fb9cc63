//! Handler for `GET /subjects`.

use axum::{Json, extract::State};
use peer_core::{matcher::directory_subjects, store::DirectoryStore};

use crate::{ApiState, error::ApiError};

/// `GET /subjects`: every subject offered or sought in the directory, in
/// catalog order.
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: DirectoryStore,
{
  let users = state.store.list_users().await.map_err(ApiError::store)?;
  Ok(Json(directory_subjects(&users)))
}
