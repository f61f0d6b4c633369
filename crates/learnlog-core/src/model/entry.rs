use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EntryId, UserId};
use super::tag::Tag;

/// A single learning journal entry
///
/// The owner is fixed at creation; every other field except `id` and
/// `created_at` is overwritten by an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,

    /// User this entry belongs to
    pub owner: UserId,

    pub title: String,

    /// URL slug derived from the title, unique per owner
    pub slug: String,

    /// Ordering key (newest first)
    pub date: NaiveDate,

    /// Minutes spent
    pub time_spent: u32,

    /// "What I learned"
    pub learned: String,

    /// "Resources to remember" (may be empty)
    pub resources: String,

    pub created_at: DateTime<Utc>,
}

/// Raw, unvalidated entry fields as submitted by a form or command line
///
/// Every field is optional here so that an absent required field can be
/// reported as a validation error instead of being unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_spent: Option<u32>,
    pub learned: Option<String>,
    pub resources: Option<String>,
}

impl EntryFields {
    /// All required fields present, no resources
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        time_spent: u32,
        learned: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            date: Some(date),
            time_spent: Some(time_spent),
            learned: Some(learned.into()),
            resources: None,
        }
    }

    pub fn with_resources(mut self, resources: impl Into<String>) -> Self {
        self.resources = Some(resources.into());
        self
    }
}

/// Entry fields that passed validation, ready for a backend to persist
///
/// `slug` is the base slug; backends append a numeric suffix when the owner
/// already has an entry with the same slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub time_spent: u32,
    pub learned: String,
    pub resources: String,
}

/// An entry together with its tags, sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDetail {
    pub entry: JournalEntry,
    pub tags: Vec<Tag>,
}
