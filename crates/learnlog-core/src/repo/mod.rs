//! Repository interfaces, one per entity
//!
//! Backends implement these traits and own every storage detail. The
//! operations in [`crate::ops`] add validation, ownership checks and logging
//! on top, and are the only intended callers.
//!
//! Reads take `&self`; writes take `&mut self` so a backend can run each one
//! inside a single transaction.

pub mod memory;

use std::cmp::Ordering;

use crate::errors::Result;
use crate::model::{EntryDraft, EntryId, JournalEntry, PasswordHash, Tag, TagId, User, UserId};

pub use memory::MemoryStore;

/// Storage for [`User`] rows
pub trait UserRepository {
    /// Insert a user unless the email is already registered
    ///
    /// The existence check and the insert must be atomic.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUser` if the email is taken, `StorageUnavailable` on backend failure.
    fn insert_user(&mut self, email: &str, password_hash: &PasswordHash) -> Result<User>;

    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Storage for [`JournalEntry`] rows
pub trait EntryRepository {
    /// Persist a new entry, giving it the first free slug for its owner
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the owner does not exist, `StorageUnavailable` on backend failure.
    fn insert_entry(&mut self, owner: UserId, draft: &EntryDraft) -> Result<JournalEntry>;

    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn get_entry(&self, id: EntryId) -> Result<Option<JournalEntry>>;

    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn find_entry_by_slug(&self, owner: UserId, slug: &str) -> Result<Option<JournalEntry>>;

    /// Entries of one owner, newest first (see [`newest_first`])
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn list_entries_by_owner(
        &self,
        owner: UserId,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>>;

    /// Overwrite the mutable fields of an entry; `None` if it does not exist
    ///
    /// The slug is only recomputed when the title changes.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn update_entry(&mut self, id: EntryId, draft: &EntryDraft) -> Result<Option<JournalEntry>>;

    /// Remove an entry and its tag associations; `false` if it did not exist
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn delete_entry(&mut self, id: EntryId) -> Result<bool>;
}

/// Storage for [`Tag`] rows and the entry/tag join relation
pub trait TagRepository {
    /// Insert a tag unless the (already normalised) name exists
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTag` if the name is taken, `StorageUnavailable` on backend failure.
    fn insert_tag(&mut self, name: &str) -> Result<Tag>;

    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn find_tag(&self, name: &str) -> Result<Option<Tag>>;

    /// All tags sorted by name
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Create missing tags, then associate all of them with `entry`
    ///
    /// Runs atomically. Already-present associations are left as they are.
    /// Returns the tags named, in input order.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist, `StorageUnavailable` on backend failure.
    fn attach_tags(&mut self, entry: EntryId, names: &[String]) -> Result<Vec<Tag>>;

    /// Remove one association; `false` if it was not present
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn detach_tag(&mut self, entry: EntryId, tag: TagId) -> Result<bool>;

    /// Entries of any owner carrying `tag`, newest first
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn entries_for_tag(&self, tag: TagId) -> Result<Vec<JournalEntry>>;

    /// Tags on `entry`, sorted by name
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on backend failure.
    fn tags_for_entry(&self, entry: EntryId) -> Result<Vec<Tag>>;
}

/// A backend that stores all three entities
pub trait JournalRepository: UserRepository + EntryRepository + TagRepository {}

impl<T> JournalRepository for T where T: UserRepository + EntryRepository + TagRepository {}

/// Canonical entry order: date descending, ties in insertion order
pub fn newest_first(a: &JournalEntry, b: &JournalEntry) -> Ordering {
    b.date.cmp(&a.date).then(a.id.cmp(&b.id))
}
