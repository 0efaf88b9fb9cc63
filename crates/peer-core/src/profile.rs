//! Profile editing, the write path that keeps stored records compatible with
//! the matcher's fallback rules.
//!
//! A [`ProfileDraft`] is loaded from a record, edited, then finalized into a
//! [`SavedProfile`] whose lists are normalized and whose legacy `role`,
//! `subjects` and `bio` fields are recomputed from the role-qualified ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  Result,
  catalog::{normalize_subjects, sort_subject_list},
  matcher::{Side, effective_bio, effective_subjects},
  record::{Role, UserRecord},
  weekday::normalize_days,
};

/// The `role` implied by a pair of normalized subject lists.
pub fn derive_role(tutor_subjects: &[String], learner_subjects: &[String]) -> Role {
  match (tutor_subjects.is_empty(), learner_subjects.is_empty()) {
    (false, false) => Role::Both,
    (false, true) => Role::Tutor,
    _ => Role::Learner,
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// An editable profile, as bound to the profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
  pub name:             String,
  pub grade:            String,
  pub tutor_subjects:   Vec<String>,
  pub learner_subjects: Vec<String>,
  pub tutor_bio:        String,
  pub learner_bio:      String,
  pub available_days:   Vec<String>,
  pub gmail:            String,
  pub snapchat:         String,
  pub instagram:        String,
}

impl ProfileDraft {
  /// Load a draft from a stored record, resolving legacy fields.
  pub fn from_record(user: &UserRecord) -> Self {
    Self {
      name:             user.name.clone(),
      grade:            user.grade.clone(),
      tutor_subjects:   effective_subjects(user, Side::Tutor),
      learner_subjects: effective_subjects(user, Side::Learner),
      tutor_bio:        effective_bio(user, Side::Tutor).unwrap_or_default(),
      learner_bio:      effective_bio(user, Side::Learner).unwrap_or_default(),
      available_days:   user.available_days.clone(),
      gmail:            user.contact.gmail.clone().unwrap_or_default(),
      snapchat:         user.contact.snapchat.clone().unwrap_or_default(),
      instagram:        user.contact.instagram.clone().unwrap_or_default(),
    }
  }

  fn subjects_mut(&mut self, side: Side) -> &mut Vec<String> {
    match side {
      Side::Tutor => &mut self.tutor_subjects,
      Side::Learner => &mut self.learner_subjects,
    }
  }

  /// Select `course` if it is not selected, deselect it otherwise.
  pub fn toggle_subject(&mut self, side: Side, course: &str) {
    let list = self.subjects_mut(side);
    if let Some(pos) = list.iter().position(|s| s == course) {
      list.remove(pos);
    } else {
      list.push(course.to_owned());
    }
    sort_subject_list(list);
  }

  pub fn remove_subject(&mut self, side: Side, course: &str) {
    self.subjects_mut(side).retain(|s| s != course);
  }

  pub fn toggle_day(&mut self, day: &str) {
    if let Some(pos) = self.available_days.iter().position(|d| d == day) {
      self.available_days.remove(pos);
    } else {
      self.available_days.push(day.to_owned());
    }
  }

  /// Normalize the draft into the shape written to the store.
  pub fn finalize(&self) -> SavedProfile {
    let tutor_subjects = normalize_subjects(&self.tutor_subjects);
    let learner_subjects = normalize_subjects(&self.learner_subjects);
    let subjects =
      normalize_subjects(tutor_subjects.iter().chain(&learner_subjects));
    let role = derive_role(&tutor_subjects, &learner_subjects);

    let tutor_bio = self.tutor_bio.trim().to_owned();
    let learner_bio = self.learner_bio.trim().to_owned();
    let bio = if tutor_bio.is_empty() {
      learner_bio.clone()
    } else {
      tutor_bio.clone()
    };

    SavedProfile {
      name: self.name.trim().to_owned(),
      grade: self.grade.trim().to_owned(),
      role,
      subjects,
      tutor_subjects,
      learner_subjects,
      tutor_bio,
      learner_bio,
      bio,
      available_days: normalize_days(&self.available_days),
      gmail: self.gmail.trim().to_owned(),
      snapchat: self.snapchat.trim().to_owned(),
      instagram: self.instagram.trim().to_owned(),
    }
  }
}

// ─── Saved ───────────────────────────────────────────────────────────────────

/// A normalized profile, ready to be merged into the user's document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProfile {
  pub name:             String,
  pub grade:            String,
  pub role:             Role,
  /// Union of both subject lists, kept for records read by older clients.
  pub subjects:         Vec<String>,
  pub tutor_subjects:   Vec<String>,
  pub learner_subjects: Vec<String>,
  pub tutor_bio:        String,
  pub learner_bio:      String,
  pub bio:              String,
  pub available_days:   Vec<String>,
  pub gmail:            String,
  pub snapchat:         String,
  pub instagram:        String,
}

impl SavedProfile {
  /// The camelCase document fields to merge into the stored record.
  pub fn to_document(&self) -> Result<Value> { Ok(serde_json::to_value(self)?) }
}
