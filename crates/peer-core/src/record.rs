//! The user record (one directory entrant) and the boundary parser that
//! turns a raw, loosely-shaped document into it.
//!
//! Documents in the store may predate the role-qualified fields, may hold a
//! comma-separated string where a list is expected, or may omit fields
//! entirely. [`UserRecord::from_document`] absorbs all of that so the rest of
//! the crate can assume a well-typed, already-defaulted record.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

// ─── Role ────────────────────────────────────────────────────────────────────

/// The legacy role tag stored alongside role-agnostic `subjects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
  Tutor,
  Learner,
  Both,
  /// Any other value found in a document; satisfies no role condition.
  Other(String),
}

impl Role {
  /// Parse case-insensitively. Surrounding whitespace is significant. Never
  /// fails; unknown values become [`Role::Other`].
  pub fn parse(raw: &str) -> Self {
    match raw.to_lowercase().as_str() {
      "tutor" => Self::Tutor,
      "learner" => Self::Learner,
      "both" => Self::Both,
      _ => Self::Other(raw.to_owned()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Tutor => "tutor",
      Self::Learner => "learner",
      Self::Both => "both",
      Self::Other(s) => s,
    }
  }

  /// Whether a record with this role offers tutoring under the legacy
  /// fallback rule.
  pub fn teaches(role: Option<&Self>) -> bool {
    matches!(role, Some(Self::Tutor | Self::Both))
  }

  /// Whether a record with this role seeks help under the legacy fallback
  /// rule. An unset role counts as a learner.
  pub fn learns(role: Option<&Self>) -> bool {
    matches!(role, None | Some(Self::Learner | Self::Both))
  }
}

impl From<String> for Role {
  fn from(s: String) -> Self { Self::parse(&s) }
}

impl From<Role> for String {
  fn from(r: Role) -> Self { r.as_str().to_owned() }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Contact links ───────────────────────────────────────────────────────────

/// Optional ways to reach a user, shown on their contact page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLinks {
  pub gmail:     Option<String>,
  pub snapchat:  Option<String>,
  pub instagram: Option<String>,
}

/// A rendered contact link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
  pub kind:   &'static str,
  pub handle: String,
  pub href:   String,
}

impl ContactLinks {
  /// Links for every non-blank handle, email first.
  pub fn links(&self) -> Vec<ContactLink> {
    let handle = |h: &Option<String>| {
      h.as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
    };

    let mut out = Vec::new();
    if let Some(h) = handle(&self.gmail) {
      out.push(ContactLink {
        kind:   "email",
        href:   format!("mailto:{h}"),
        handle: h,
      });
    }
    if let Some(h) = handle(&self.snapchat) {
      out.push(ContactLink {
        kind:   "snapchat",
        href:   format!("https://www.snapchat.com/add/{h}"),
        handle: h,
      });
    }
    if let Some(h) = handle(&self.instagram) {
      out.push(ContactLink {
        kind:   "instagram",
        href:   format!("https://instagram.com/{h}"),
        handle: h,
      });
    }
    out
  }
}

// ─── UserRecord ──────────────────────────────────────────────────────────────

/// A read-only snapshot of one directory entrant.
///
/// Subject lists hold the strings exactly as stored; use the derivations in
/// [`crate::matcher`] to obtain the effective per-role view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
  /// The backing document key.
  pub id:               String,
  pub email:            String,
  pub name:             String,
  pub grade:            String,
  pub role:             Option<Role>,
  /// Legacy role-agnostic subject list.
  pub subjects:         Vec<String>,
  pub tutor_subjects:   Vec<String>,
  pub learner_subjects: Vec<String>,
  /// Legacy role-agnostic bio.
  pub bio:              Option<String>,
  pub tutor_bio:        Option<String>,
  pub learner_bio:      Option<String>,
  pub available_days:   Vec<String>,
  pub contact:          ContactLinks,
}

impl UserRecord {
  /// Parse a raw store document into a record keyed by `id`.
  ///
  /// Fields of the wrong JSON type are treated as absent. Only a document
  /// that is not an object at all is rejected.
  pub fn from_document(id: impl Into<String>, doc: &Value) -> Result<Self> {
    let id = id.into();
    let Some(obj) = doc.as_object() else {
      return Err(Error::MalformedDocument(id));
    };

    Ok(Self {
      email: string_field(obj, "email").unwrap_or_default(),
      name: string_field(obj, "name").unwrap_or_default(),
      grade: string_field(obj, "grade").unwrap_or_default(),
      role: string_field(obj, "role").map(Role::from),
      subjects: subject_field(obj, "subjects"),
      tutor_subjects: subject_field(obj, "tutorSubjects"),
      learner_subjects: subject_field(obj, "learnerSubjects"),
      bio: string_field(obj, "bio"),
      tutor_bio: string_field(obj, "tutorBio"),
      learner_bio: string_field(obj, "learnerBio"),
      available_days: string_array(obj.get("availableDays")),
      contact: ContactLinks {
        gmail:     string_field(obj, "gmail"),
        snapchat:  string_field(obj, "snapchat"),
        instagram: string_field(obj, "instagram"),
      },
      id,
    })
  }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
  obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn string_array(value: Option<&Value>) -> Vec<String> {
  match value {
    Some(Value::Array(items)) => items
      .iter()
      .filter_map(Value::as_str)
      .map(str::to_owned)
      .collect(),
    _ => Vec::new(),
  }
}

/// Subject fields accept either a list or a comma-separated string.
fn subject_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
  match obj.get(key) {
    Some(Value::String(s)) => s
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_owned)
      .collect(),
    other => string_array(other),
  }
}
