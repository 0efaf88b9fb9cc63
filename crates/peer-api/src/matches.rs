//! Handlers for `/matches` endpoints.
//!
//! Both lists are recomputed from the full population on every request; the
//! viewer and the show-all toggle come from the request, nothing is cached.

use axum::{
  Json,
  extract::{Query, State},
};
use peer_core::{
  matcher::{Side, compute_matches},
  present::MatchCard,
  store::DirectoryStore,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError, viewer::Viewer};

#[derive(Debug, Deserialize, Default)]
pub struct MatchParams {
  /// Bypass subject overlap and list everyone on the requested side.
  #[serde(default)]
  pub show_all: bool,
}

async fn cards<S: DirectoryStore>(
  state: &ApiState<S>,
  viewer: &Viewer,
  side: Side,
  show_all: bool,
) -> Result<Vec<MatchCard>, ApiError> {
  let users = state.store.list_users().await.map_err(ApiError::store)?;
  let me = viewer.id().and_then(|id| users.iter().find(|u| u.id == id));

  let cards: Vec<MatchCard> = compute_matches(&users, viewer.id(), side, show_all)
    .into_iter()
    .map(|candidate| MatchCard::build(candidate, me, side))
    .collect();

  tracing::debug!(
    viewer = viewer.id().unwrap_or("-"),
    ?side,
    show_all,
    population = users.len(),
    matches = cards.len(),
    "computed matches"
  );
  Ok(cards)
}

/// `GET /matches/tutors[?show_all=true]`
pub async fn tutors<S>(
  State(state): State<ApiState<S>>,
  viewer: Viewer,
  Query(params): Query<MatchParams>,
) -> Result<Json<Vec<MatchCard>>, ApiError>
where
  S: DirectoryStore,
{
  Ok(Json(cards(&state, &viewer, Side::Tutor, params.show_all).await?))
}

/// `GET /matches/learners[?show_all=true]`
pub async fn learners<S>(
  State(state): State<ApiState<S>>,
  viewer: Viewer,
  Query(params): Query<MatchParams>,
) -> Result<Json<Vec<MatchCard>>, ApiError>
where
  S: DirectoryStore,
{
  Ok(Json(cards(&state, &viewer, Side::Learner, params.show_all).await?))
}
