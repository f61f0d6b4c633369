//! learnlog core - data model and access rules of the learning journal
//!
//! This crate provides:
//! - `User`, `JournalEntry` and `Tag` models plus the caller `Identity`
//! - Repository traits (one per entity) and an in-memory backend
//! - Owner-scoped store operations with validation and lifecycle logging
//! - Argon2id password hashing
//! - The error and logging facilities shared by every learnlog crate
//!
//! Storage backends other than [`repo::MemoryStore`] live in their own crates.

pub mod auth;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod repo;
pub mod rules;

// Used by the exported logging macros
#[doc(hidden)]
pub use learnlog_core_types;

pub use errors::{ExError, ExErrorKind, JournalError, Result};
pub use model::{Caller, EntryFields, EntryId, Identity, JournalEntry, Tag, TagId, User, UserId};
pub use repo::{EntryRepository, JournalRepository, MemoryStore, TagRepository, UserRepository};
