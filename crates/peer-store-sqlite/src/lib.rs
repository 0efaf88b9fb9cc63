//! SQLite backend for the peer directory.
//!
//! Each user is one schemaless JSON document, mirroring the hosted document
//! store the directory was designed around. Wraps [`tokio_rusqlite`] so all
//! database access runs on a dedicated thread without blocking the async
//! runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
