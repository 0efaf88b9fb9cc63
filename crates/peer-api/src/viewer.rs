//! The `Viewer` extractor: who is asking.
//!
//! Authentication itself happens upstream; by the time a request reaches the
//! API the signed-in user's id travels in the `x-viewer-id` header. Handlers
//! receive it as an explicit value and pass it on to the matcher.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the signed-in user's id.
pub const VIEWER_HEADER: &str = "x-viewer-id";

/// The signed-in user's id, if any.
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<String>);

impl Viewer {
  pub fn id(&self) -> Option<&str> { self.0.as_deref() }
}

impl<S: Send + Sync> FromRequestParts<S> for Viewer {
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let id = parts
      .headers
      .get(VIEWER_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::trim)
      .filter(|v| !v.is_empty())
      .map(str::to_owned);
    Ok(Viewer(id))
  }
}
