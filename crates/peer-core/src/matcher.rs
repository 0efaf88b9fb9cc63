//! The directory matcher: per-role derivations over a [`UserRecord`] and the
//! tutor/learner match lists computed for a viewer.
//!
//! Every function here is pure. The viewer and the "show all" toggles are
//! explicit arguments; nothing is read from ambient session state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
  catalog::normalize_subjects,
  record::{Role, UserRecord},
};

/// One half of a tutoring pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
  Tutor,
  Learner,
}

impl Side {
  pub fn opposite(self) -> Self {
    match self {
      Self::Tutor => Self::Learner,
      Self::Learner => Self::Tutor,
    }
  }

  /// Whether `role` feeds the legacy `subjects`/`bio` fields into this side.
  fn legacy_applies(self, role: Option<&Role>) -> bool {
    match self {
      Self::Tutor => Role::teaches(role),
      Self::Learner => Role::learns(role),
    }
  }
}

// ─── Derivations ─────────────────────────────────────────────────────────────

fn trimmed(list: &[String]) -> Vec<String> {
  list
    .iter()
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
    .collect()
}

fn non_blank(text: Option<&String>) -> Option<String> {
  text
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

/// The subjects `user` offers or seeks on `side`, after the legacy fallback.
///
/// The role-qualified list wins when it has any non-blank entry; otherwise
/// the legacy list is used if the record's role covers `side`.
pub fn effective_subjects(user: &UserRecord, side: Side) -> Vec<String> {
  let qualified = match side {
    Side::Tutor => &user.tutor_subjects,
    Side::Learner => &user.learner_subjects,
  };
  let qualified = trimmed(qualified);
  if !qualified.is_empty() {
    return qualified;
  }
  if side.legacy_applies(user.role.as_ref()) {
    return trimmed(&user.subjects);
  }
  Vec::new()
}

pub fn effective_tutor_subjects(user: &UserRecord) -> Vec<String> {
  effective_subjects(user, Side::Tutor)
}

pub fn effective_learner_subjects(user: &UserRecord) -> Vec<String> {
  effective_subjects(user, Side::Learner)
}

/// The bio shown for `user` on `side`, following the same fallback as
/// [`effective_subjects`].
pub fn effective_bio(user: &UserRecord, side: Side) -> Option<String> {
  let qualified = match side {
    Side::Tutor => user.tutor_bio.as_ref(),
    Side::Learner => user.learner_bio.as_ref(),
  };
  non_blank(qualified).or_else(|| {
    side
      .legacy_applies(user.role.as_ref())
      .then(|| non_blank(user.bio.as_ref()))
      .flatten()
  })
}

pub fn effective_tutor_bio(user: &UserRecord) -> Option<String> {
  effective_bio(user, Side::Tutor)
}

pub fn effective_learner_bio(user: &UserRecord) -> Option<String> {
  effective_bio(user, Side::Learner)
}

// ─── Overlap ─────────────────────────────────────────────────────────────────

/// Lowercased, trimmed, non-blank entries.
pub(crate) fn folded<S: AsRef<str>>(items: &[S]) -> HashSet<String> {
  items
    .iter()
    .map(|s| s.as_ref().trim().to_lowercase())
    .filter(|s| !s.is_empty())
    .collect()
}

/// True iff the two day lists share at least one day, ignoring case and
/// surrounding whitespace.
pub fn has_day_overlap<A: AsRef<str>, B: AsRef<str>>(
  days_a: &[A],
  days_b: &[B],
) -> bool {
  let a = folded(days_a);
  !a.is_empty() && !a.is_disjoint(&folded(days_b))
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// Candidates from `users` who could fill `wanted` for the viewer.
///
/// For `Side::Tutor` the viewer's learner subjects are matched against each
/// candidate's tutor subjects, and symmetrically for `Side::Learner`.
///
/// - No viewer id: nothing.
/// - Viewer has no subjects on the complementary side and `show_all` is off:
///   nothing.
/// - The viewer's own record is never returned.
/// - Availability only excludes when both sides declared days and they are
///   disjoint.
/// - A candidate with no subjects on `wanted` appears only under `show_all`.
/// - Otherwise `show_all` admits everyone, and without it the subject sets
///   must intersect case-insensitively.
///
/// Input order is preserved.
pub fn compute_matches<'a>(
  users: &'a [UserRecord],
  viewer_id: Option<&str>,
  wanted: Side,
  show_all: bool,
) -> Vec<&'a UserRecord> {
  let Some(viewer_id) = viewer_id else {
    return Vec::new();
  };
  let viewer = users.iter().find(|u| u.id == viewer_id);

  let viewer_subjects = viewer
    .map(|v| folded(&effective_subjects(v, wanted.opposite())))
    .unwrap_or_default();
  if !show_all && viewer_subjects.is_empty() {
    return Vec::new();
  }

  let viewer_days = viewer
    .map(|v| folded(&v.available_days))
    .unwrap_or_default();

  users
    .iter()
    .filter(|candidate| candidate.id != viewer_id)
    .filter(|candidate| {
      let days = folded(&candidate.available_days);
      viewer_days.is_empty() || days.is_empty() || !viewer_days.is_disjoint(&days)
    })
    .filter(|candidate| {
      let subjects = folded(&effective_subjects(candidate, wanted));
      if subjects.is_empty() {
        show_all
      } else {
        show_all || !subjects.is_disjoint(&viewer_subjects)
      }
    })
    .collect()
}

/// Prospective tutors for the viewer.
pub fn compute_tutor_matches<'a>(
  users: &'a [UserRecord],
  viewer_id: Option<&str>,
  show_all: bool,
) -> Vec<&'a UserRecord> {
  compute_matches(users, viewer_id, Side::Tutor, show_all)
}

/// Prospective learners for the viewer.
pub fn compute_learner_matches<'a>(
  users: &'a [UserRecord],
  viewer_id: Option<&str>,
  show_all: bool,
) -> Vec<&'a UserRecord> {
  compute_matches(users, viewer_id, Side::Learner, show_all)
}

// ─── Subject index ───────────────────────────────────────────────────────────

/// Filter value meaning "every subject".
pub const ALL_SUBJECTS: &str = "All";

/// Every subject anyone in the directory offers or seeks, normalized.
pub fn directory_subjects(users: &[UserRecord]) -> Vec<String> {
  normalize_subjects(users.iter().flat_map(|u| {
    effective_subjects(u, Side::Tutor)
      .into_iter()
      .chain(effective_subjects(u, Side::Learner))
  }))
}

/// Users with `subject` among their effective subjects on either side,
/// compared case-insensitively. `None`, a blank value, or [`ALL_SUBJECTS`]
/// keeps everyone. Input order is preserved.
pub fn filter_by_subject<'a>(
  users: &'a [UserRecord],
  subject: Option<&str>,
) -> Vec<&'a UserRecord> {
  let wanted = subject
    .map(str::trim)
    .filter(|s| !s.is_empty() && *s != ALL_SUBJECTS)
    .map(str::to_lowercase);
  let Some(wanted) = wanted else {
    return users.iter().collect();
  };

  users
    .iter()
    .filter(|u| {
      [Side::Tutor, Side::Learner].into_iter().any(|side| {
        effective_subjects(u, side)
          .iter()
          .any(|s| s.to_lowercase() == wanted)
      })
    })
    .collect()
}
