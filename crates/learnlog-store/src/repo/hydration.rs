//! Row to model conversion
//!
//! Column lists are shared by every query that selects a whole row so the
//! positional reads below stay in step with the SQL.

use chrono::{DateTime, Utc};
use learnlog_core::model::{EntryId, JournalEntry, PasswordHash, Tag, TagId, User, UserId};
use rusqlite::types::Type;
use rusqlite::Row;

pub const USER_COLUMNS: &str = "u.id, u.email, u.password_hash, u.created_at";

pub const ENTRY_COLUMNS: &str =
    "e.id, e.user_id, e.title, e.slug, e.date, e.time_spent, e.learned, e.resources, e.created_at";

pub const TAG_COLUMNS: &str = "t.id, t.name";

pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        email: row.get(1)?,
        password_hash: PasswordHash::from_phc(row.get(2)?),
        created_at: timestamp(row, 3)?,
    })
}

pub fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    Ok(JournalEntry {
        id: EntryId(row.get(0)?),
        owner: UserId(row.get(1)?),
        title: row.get(2)?,
        slug: row.get(3)?,
        date: row.get(4)?,
        time_spent: row.get(5)?,
        learned: row.get(6)?,
        resources: row.get(7)?,
        created_at: timestamp(row, 8)?,
    })
}

pub fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: TagId(row.get(0)?),
        name: row.get(1)?,
    })
}

/// Timestamps are stored as unix milliseconds
pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", millis).into(),
        )
    })
}
