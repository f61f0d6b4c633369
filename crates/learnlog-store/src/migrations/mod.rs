//! Schema migrations
//!
//! Embedded SQL applied once each, in order, recorded with a checksum in
//! `schema_version`.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
