//! Core types and pure logic for the peer-tutoring directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! holds the subject catalog, the user record model, and the matcher that
//! pairs prospective tutors with prospective learners. Everything here is a
//! deterministic function of its arguments; fetching and persisting records is
//! the job of a [`store::DirectoryStore`] backend.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod matcher;
pub mod present;
pub mod profile;
pub mod record;
pub mod store;
pub mod weekday;

pub use error::{Error, Result};
