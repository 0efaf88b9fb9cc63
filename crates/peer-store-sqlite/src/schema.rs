//! SQL schema for the peer directory store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per user. `document` is the raw JSON object exactly as written by
-- clients; it is parsed (and legacy fields resolved) on read.
CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    document    TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
