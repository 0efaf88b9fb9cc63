//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; documents are compact JSON.

use chrono::{DateTime, Utc};
use peer_core::record::UserRecord;
use serde_json::Value;

use crate::Result;

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_document(doc: &Value) -> String { doc.to_string() }

/// Parse a stored document into a [`UserRecord`].
pub fn decode_document(id: &str, raw: &str) -> Result<UserRecord> {
  let doc: Value = serde_json::from_str(raw)?;
  Ok(UserRecord::from_document(id, &doc)?)
}

/// The document written on first sign-in.
pub fn bare_document(name: &str, email: &str, created_at: &str) -> Value {
  serde_json::json!({
    "name": name,
    "email": email,
    "createdAt": created_at,
  })
}
