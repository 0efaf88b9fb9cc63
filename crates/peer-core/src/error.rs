//! Error types for `peer-core`.
//!
//! Matching and filtering are total and never fail; errors only arise at the
//! storage boundary, where raw documents are parsed into records.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("document {0} is not a JSON object")]
  MalformedDocument(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
