//! The `DirectoryStore` trait, the storage collaborator the matcher relies
//! on for its input.
//!
//! Backends (e.g. `peer-store-sqlite`) hold raw user documents and hand them
//! out as parsed [`UserRecord`]s. Higher layers (`peer-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde_json::Value;

use crate::{profile::SavedProfile, record::UserRecord};

/// Abstraction over a directory backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every user, in a stable order (by document id).
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<UserRecord>, Self::Error>> + Send + '_;

  /// Retrieve one user. Returns `None` if there is no such document.
  fn get_user<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<UserRecord>, Self::Error>> + Send + 'a;

  /// Create a bare document for a first-time sign-in.
  ///
  /// Returns `true` if a document was created, `false` if one already
  /// existed (in which case it is left untouched).
  fn ensure_user<'a>(
    &'a self,
    id: &'a str,
    name: &'a str,
    email: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Merge a normalized profile into the user's document, creating it if
  /// needed. Fields not present in the profile are preserved.
  fn save_profile<'a>(
    &'a self,
    id: &'a str,
    profile: &'a SavedProfile,
  ) -> impl Future<Output = Result<UserRecord, Self::Error>> + Send + 'a;

  /// Insert or replace a raw document verbatim. Used for seeding.
  fn import_document<'a>(
    &'a self,
    id: &'a str,
    document: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
