//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use peer_core::store::DirectoryStore;
use peer_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{ApiConfig, api_router, viewer::VIEWER_HEADER};

async fn seeded() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let docs = [
    ("ada", json!({
      "name": "Ada", "email": "ada@asl.org",
      "learnerSubjects": ["Algebra I"], "tutorSubjects": ["Poetry"],
      "availableDays": ["Monday"],
    })),
    ("ben", json!({
      "name": "Ben", "tutorSubjects": ["algebra i"], "tutorBio": "Proofs!",
      "availableDays": ["monday", "Friday"],
    })),
    ("cy", json!({ "name": "Cy", "tutorSubjects": ["Algebra I"], "availableDays": ["Sunday"] })),
    ("dee", json!({ "name": "Dee", "role": "learner", "subjects": ["Poetry"] })),
    ("eve", json!({ "name": "Eve", "tutorSubjects": ["Calculus"] })),
  ];
  for (id, doc) in docs {
    store.import_document(id, doc).await.unwrap();
  }
  api_router(Arc::new(store), ApiConfig::default())
}

async fn call(
  app: Router,
  method: &str,
  uri: &str,
  viewer: Option<&str>,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(v) = viewer {
    builder = builder.header(VIEWER_HEADER, v);
  }
  let body = match body {
    Some(b) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(b.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn ids(value: &Value) -> Vec<&str> {
  value
    .as_array()
    .unwrap()
    .iter()
    .map(|c| c["id"].as_str().unwrap())
    .collect()
}

// ── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_search_prunes_courses() {
  let app = seeded().await;
  let (status, body) = call(app, "GET", "/catalog?q=algebra", None, None).await;
  assert_eq!(status, StatusCode::OK);
  let categories = body.as_array().unwrap();
  assert_eq!(categories.len(), 1);
  assert_eq!(categories[0]["label"], "Mathematics");
  assert_eq!(categories[0]["courses"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn catalog_without_query_is_complete() {
  let app = seeded().await;
  let (_, body) = call(app, "GET", "/catalog", None, None).await;
  assert_eq!(
    body.as_array().unwrap().len(),
    peer_core::catalog::subject_library().len()
  );
}

// ── Matches ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn tutor_matches_for_viewer() {
  let app = seeded().await;
  let (status, body) =
    call(app, "GET", "/matches/tutors", Some("ada"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&body), vec!["ben"]);
  assert_eq!(body[0]["matchLabel"], "algebra i");
  assert_eq!(body[0]["bio"], "Proofs!");
}

#[tokio::test]
async fn tutor_matches_show_all() {
  let app = seeded().await;
  let (_, body) =
    call(app, "GET", "/matches/tutors?show_all=true", Some("ada"), None).await;
  // cy is excluded by availability; dee has no tutor subjects but shows up
  // under show-all.
  assert_eq!(ids(&body), vec!["ben", "dee", "eve"]);
}

#[tokio::test]
async fn learner_matches_use_legacy_fields() {
  let app = seeded().await;
  let (_, body) =
    call(app, "GET", "/matches/learners", Some("ada"), None).await;
  assert_eq!(ids(&body), vec!["dee"]);
  assert_eq!(body[0]["subjects"], json!(["Poetry"]));
}

#[tokio::test]
async fn matches_without_viewer_are_empty() {
  let app = seeded().await;
  let (status, body) =
    call(app, "GET", "/matches/tutors?show_all=true", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.as_array().unwrap().is_empty());
}

// ── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_rejects_foreign_domain() {
  let app = seeded().await;
  let body = json!({ "id": "zed", "name": "Zed", "email": "zed@gmail.com" });
  let (status, body) = call(app, "POST", "/sessions", None, Some(body)).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert!(body["error"].as_str().unwrap().contains("asl.org"));
}

#[tokio::test]
async fn session_creates_then_reuses_document() {
  let app = seeded().await;
  let body = json!({ "id": "zed", "name": "Zed", "email": "Zed@ASL.org" });
  let (status, user) =
    call(app.clone(), "POST", "/sessions", None, Some(body.clone())).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(user["name"], "Zed");

  let (status, _) = call(app, "POST", "/sessions", None, Some(body)).await;
  assert_eq!(status, StatusCode::OK);
}

// ── Users & profiles ────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_user_is_404() {
  let app = seeded().await;
  let (status, _) = call(app, "GET", "/users/nobody", None, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_draft_resolves_legacy_fields() {
  let app = seeded().await;
  let (status, draft) =
    call(app, "GET", "/users/dee/profile", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(draft["learnerSubjects"], json!(["Poetry"]));
  assert_eq!(draft["tutorSubjects"], json!([]));
}

#[tokio::test]
async fn profile_update_requires_owner() {
  let app = seeded().await;
  let draft = json!({ "name": "Hacked" });
  let (status, _) =
    call(app, "PUT", "/users/ben/profile", Some("ada"), Some(draft)).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_update_normalizes_and_persists() {
  let app = seeded().await;
  let draft = json!({
    "name": " Ben B. ",
    "tutorSubjects": ["Poetry", " algebra i", "Poetry"],
    "learnerSubjects": ["Chemistry"],
    "tutorBio": " Proofs and poems ",
    "availableDays": ["friday", "Monday"],
  });
  let (status, saved) =
    call(app.clone(), "PUT", "/users/ben/profile", Some("ben"), Some(draft)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(saved["role"], "both");
  assert_eq!(saved["tutorSubjects"], json!(["algebra i", "Poetry"]));
  assert_eq!(saved["bio"], "Proofs and poems");

  let (_, user) = call(app.clone(), "GET", "/users/ben", None, None).await;
  assert_eq!(user["name"], "Ben B.");
  assert_eq!(user["availableDays"], json!(["Monday", "Friday"]));

  let (_, contact) = call(app, "GET", "/users/ben/contact", None, None).await;
  assert_eq!(contact["links"], json!([]));
}

#[tokio::test]
async fn subject_index_covers_both_sides() {
  let app = seeded().await;
  let (status, subjects) = call(app, "GET", "/subjects", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(subjects, json!(["Algebra I", "algebra i", "Calculus", "Poetry"]));
}

#[tokio::test]
async fn users_filtered_by_subject() {
  let app = seeded().await;
  let (status, body) =
    call(app.clone(), "GET", "/users?subject=poetry", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&body), vec!["ada", "dee"]);

  let (_, body) =
    call(app.clone(), "GET", "/users?subject=ALGEBRA%20I", None, None).await;
  assert_eq!(ids(&body), vec!["ada", "ben", "cy"]);

  let (_, body) = call(app.clone(), "GET", "/users?subject=All", None, None).await;
  assert_eq!(ids(&body), vec!["ada", "ben", "cy", "dee", "eve"]);

  let (_, body) = call(app, "GET", "/users?subject=Chemistry", None, None).await;
  assert_eq!(ids(&body), Vec::<&str>::new());
}
