//! [`SqliteStore`], the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use chrono::Utc;
use peer_core::{
  profile::SavedProfile,
  record::UserRecord,
  store::DirectoryStore,
};
use rusqlite::OptionalExtension as _;
use serde_json::Value;

use crate::{
  Error, Result,
  encode::{bare_document, decode_document, encode_document, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A directory store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Upsert a document. With `merge`, top-level fields of `doc` are patched
  /// into the existing document instead of replacing it.
  async fn write_document(&self, id: &str, doc: &Value, merge: bool) -> Result<()> {
    let id_str  = id.to_owned();
    let doc_str = encode_document(doc);
    let now_str = encode_dt(Utc::now());

    let sql = if merge {
      "INSERT INTO users (user_id, document, created_at, updated_at)
       VALUES (?1, ?2, ?3, ?3)
       ON CONFLICT(user_id) DO UPDATE SET
         document   = json_patch(users.document, excluded.document),
         updated_at = excluded.updated_at"
    } else {
      "INSERT INTO users (user_id, document, created_at, updated_at)
       VALUES (?1, ?2, ?3, ?3)
       ON CONFLICT(user_id) DO UPDATE SET
         document   = excluded.document,
         updated_at = excluded.updated_at"
    };

    self
      .conn
      .call(move |conn| {
        conn.execute(sql, rusqlite::params![id_str, doc_str, now_str])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  async fn list_users(&self) -> Result<Vec<UserRecord>> {
    let rows: Vec<(String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT user_id, document FROM users ORDER BY user_id")?;
        let rows = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Unreadable documents are skipped, not fatal.
    let users = rows
      .into_iter()
      .filter_map(|(id, raw)| match decode_document(&id, &raw) {
        Ok(user) => Some(user),
        Err(e) => {
          tracing::warn!(user_id = %id, error = %e, "skipping unreadable user document");
          None
        }
      })
      .collect();
    Ok(users)
  }

  async fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
    let id_str = id.to_owned();
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            "SELECT document FROM users WHERE user_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        Ok(raw)
      })
      .await?;

    raw.map(|raw| decode_document(id, &raw)).transpose()
  }

  async fn ensure_user(&self, id: &str, name: &str, email: &str) -> Result<bool> {
    let now_str = encode_dt(Utc::now());
    let doc_str = encode_document(&bare_document(name, email, &now_str));
    let id_str  = id.to_owned();

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT OR IGNORE INTO users (user_id, document, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)",
          rusqlite::params![id_str, doc_str, now_str],
        )?;
        Ok(n)
      })
      .await?;
    Ok(inserted > 0)
  }

  async fn save_profile(&self, id: &str, profile: &SavedProfile) -> Result<UserRecord> {
    let doc = profile.to_document()?;
    self.write_document(id, &doc, true).await?;
    self
      .get_user(id)
      .await?
      .ok_or_else(|| Error::UserNotFound(id.to_owned()))
  }

  async fn import_document(&self, id: &str, document: Value) -> Result<()> {
    UserRecord::from_document(id, &document)?;
    self.write_document(id, &document, false).await
  }
}
