//! View-model helpers for rendering match results.

use serde::Serialize;

use crate::{
  matcher::{Side, effective_bio, effective_subjects, folded},
  record::UserRecord,
};

/// The candidate's subjects on `side` that the viewer has on the opposite
/// side, compared case-insensitively and returned in the candidate's casing.
pub fn matched_subjects(
  candidate: &UserRecord,
  viewer: &UserRecord,
  side: Side,
) -> Vec<String> {
  let wanted = folded(&effective_subjects(viewer, side.opposite()));
  effective_subjects(candidate, side)
    .into_iter()
    .filter(|s| wanted.contains(&s.to_lowercase()))
    .collect()
}

/// Join items as `"A"`, `"A & B"`, `"A, B & C"`.
pub fn join_readable<S: AsRef<str>>(items: &[S]) -> String {
  match items {
    [] => String::new(),
    [only] => only.as_ref().to_owned(),
    [head @ .., last] => {
      let head: Vec<&str> = head.iter().map(|s| s.as_ref()).collect();
      format!("{} & {}", head.join(", "), last.as_ref())
    }
  }
}

/// A candidate as displayed in one of the match lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCard {
  pub id:               String,
  pub name:             String,
  pub grade:            String,
  pub side:             Side,
  pub subjects:         Vec<String>,
  pub bio:              Option<String>,
  pub matched_subjects: Vec<String>,
  /// [`join_readable`] over `matched_subjects`; empty when nothing matched.
  pub match_label:      String,
  pub available_days:   Vec<String>,
}

impl MatchCard {
  pub fn build(
    candidate: &UserRecord,
    viewer: Option<&UserRecord>,
    side: Side,
  ) -> Self {
    let matched = viewer
      .map(|v| matched_subjects(candidate, v, side))
      .unwrap_or_default();
    Self {
      id:               candidate.id.clone(),
      name:             candidate.name.clone(),
      grade:            candidate.grade.clone(),
      side,
      subjects:         effective_subjects(candidate, side),
      bio:              effective_bio(candidate, side),
      match_label:      join_readable(&matched),
      matched_subjects: matched,
      available_days:   candidate.available_days.clone(),
    }
  }
}

pub fn tutor_card(candidate: &UserRecord, viewer: Option<&UserRecord>) -> MatchCard {
  MatchCard::build(candidate, viewer, Side::Tutor)
}

pub fn learner_card(
  candidate: &UserRecord,
  viewer: Option<&UserRecord>,
) -> MatchCard {
  MatchCard::build(candidate, viewer, Side::Learner)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::Role;

  #[test]
  fn join_readable_forms() {
    assert_eq!(join_readable::<&str>(&[]), "");
    assert_eq!(join_readable(&["A"]), "A");
    assert_eq!(join_readable(&["A", "B"]), "A & B");
    assert_eq!(join_readable(&["A", "B", "C"]), "A, B & C");
  }

  #[test]
  fn matched_subjects_keep_candidate_casing() {
    let viewer = UserRecord {
      id: "v".into(),
      learner_subjects: vec!["algebra i".into(), "Poetry".into()],
      ..Default::default()
    };
    let tutor = UserRecord {
      id: "t".into(),
      tutor_subjects: vec!["Algebra I".into(), "Calculus".into(), "POETRY".into()],
      ..Default::default()
    };

    let matched = matched_subjects(&tutor, &viewer, Side::Tutor);
    assert_eq!(matched, vec!["Algebra I", "POETRY"]);

    let card = tutor_card(&tutor, Some(&viewer));
    assert_eq!(card.match_label, "Algebra I & POETRY");
    assert_eq!(card.subjects.len(), 3);
  }

  #[test]
  fn learner_card_uses_learner_fields() {
    let learner = UserRecord {
      id: "l".into(),
      role: Some(Role::Both),
      subjects: vec!["Chemistry".into()],
      bio: Some("hi".into()),
      ..Default::default()
    };
    let card = learner_card(&learner, None);
    assert_eq!(card.subjects, vec!["Chemistry"]);
    assert_eq!(card.bio.as_deref(), Some("hi"));
    assert!(card.matched_subjects.is_empty());
    assert_eq!(card.match_label, "");
  }
}
