pub mod entry;
pub mod identity;
pub mod ids;
pub mod tag;
pub mod user;

pub use entry::{EntryDetail, EntryDraft, EntryFields, JournalEntry};
pub use identity::{Caller, Identity};
pub use ids::{EntryId, TagId, UserId};
pub use tag::Tag;
pub use user::{PasswordHash, User};
