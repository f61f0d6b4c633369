//! learnlog store - SQLite persistence for the learning journal
//!
//! Provides:
//! - [`Database`] and per-request [`Session`]s
//! - Embedded, checksummed schema migrations
//! - `Session` implementations of the user, entry and tag repositories

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use db::{Database, Session};
pub use errors::Result;
