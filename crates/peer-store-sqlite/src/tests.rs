//! Integration tests for `SqliteStore` against an in-memory database.

use peer_core::{
  matcher::{Side, compute_tutor_matches, effective_subjects},
  profile::ProfileDraft,
  record::Role,
  store::DirectoryStore,
};
use serde_json::json;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Sign-in ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_user_creates_once() {
  let s = store().await;

  assert!(s.ensure_user("u1", "Ada", "ada@asl.org").await.unwrap());
  assert!(!s.ensure_user("u1", "Someone Else", "x@asl.org").await.unwrap());

  let user = s.get_user("u1").await.unwrap().unwrap();
  assert_eq!(user.name, "Ada");
  assert_eq!(user.email, "ada@asl.org");
  assert!(user.tutor_subjects.is_empty());
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user("nobody").await.unwrap().is_none());
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_users_is_ordered_by_id() {
  let s = store().await;
  s.import_document("c", json!({ "name": "C" })).await.unwrap();
  s.import_document("a", json!({ "name": "A" })).await.unwrap();
  s.import_document("b", json!({ "name": "B" })).await.unwrap();

  let users = s.list_users().await.unwrap();
  let ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
  assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn import_rejects_non_objects() {
  let s = store().await;
  let err = s.import_document("x", json!("just a string")).await.unwrap_err();
  assert!(matches!(err, Error::Core(_)));
  assert!(s.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn legacy_documents_are_parsed_on_read() {
  let s = store().await;
  s.import_document(
    "legacy",
    json!({ "name": "Old", "role": "Both", "subjects": "Chemistry, Poetry" }),
  )
  .await
  .unwrap();

  let user = s.get_user("legacy").await.unwrap().unwrap();
  assert_eq!(user.role, Some(Role::Both));
  assert_eq!(effective_subjects(&user, Side::Tutor), vec!["Chemistry", "Poetry"]);
  assert_eq!(effective_subjects(&user, Side::Learner), vec!["Chemistry", "Poetry"]);
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_profile_merges_into_existing_document() {
  let s = store().await;
  s.ensure_user("u1", "Ada", "ada@asl.org").await.unwrap();

  let draft = ProfileDraft {
    name: "Ada L.".into(),
    tutor_subjects: vec!["Poetry".into(), " Calculus".into()],
    available_days: vec!["monday".into()],
    ..Default::default()
  };
  let saved = s.save_profile("u1", &draft.finalize()).await.unwrap();

  assert_eq!(saved.name, "Ada L.");
  assert_eq!(saved.email, "ada@asl.org", "email survives the merge");
  assert_eq!(saved.role, Some(Role::Tutor));
  assert_eq!(saved.tutor_subjects, vec!["Calculus", "Poetry"]);
  assert_eq!(saved.available_days, vec!["Monday"]);
}

#[tokio::test]
async fn save_profile_replaces_lists() {
  let s = store().await;
  let first = ProfileDraft {
    tutor_subjects: vec!["Poetry".into(), "Calculus".into()],
    ..Default::default()
  };
  s.save_profile("u1", &first.finalize()).await.unwrap();

  let second = ProfileDraft {
    tutor_subjects: vec!["Calculus".into()],
    ..Default::default()
  };
  let saved = s.save_profile("u1", &second.finalize()).await.unwrap();
  assert_eq!(saved.tutor_subjects, vec!["Calculus"]);
  assert_eq!(saved.subjects, vec!["Calculus"]);
}

#[tokio::test]
async fn stored_population_feeds_the_matcher() {
  let s = store().await;
  s.import_document("learner", json!({ "learnerSubjects": ["Algebra I"] }))
    .await
    .unwrap();
  s.import_document("tutor-a", json!({ "tutorSubjects": ["algebra i"] }))
    .await
    .unwrap();
  s.import_document("tutor-b", json!({ "tutorSubjects": ["Algebra II"] }))
    .await
    .unwrap();

  let users = s.list_users().await.unwrap();
  let matches = compute_tutor_matches(&users, Some("learner"), false);
  let ids: Vec<_> = matches.iter().map(|u| u.id.as_str()).collect();
  assert_eq!(ids, vec!["tutor-a"]);
}
