//! Handler for `GET /catalog`.

use std::borrow::Cow;

use axum::{Json, extract::Query};
use peer_core::catalog::{SubjectCategory, filter_catalog, subject_library};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct CatalogParams {
  /// Free-text search over category labels, tags and course names.
  #[serde(default)]
  pub q: String,
}

/// `GET /catalog[?q=...]`
pub async fn handler(
  Query(params): Query<CatalogParams>,
) -> Json<Vec<Cow<'static, SubjectCategory>>> {
  let categories = filter_catalog(subject_library(), &params.q);
  tracing::debug!(query = %params.q, categories = categories.len(), "catalog search");
  Json(categories)
}
