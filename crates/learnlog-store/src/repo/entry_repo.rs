use std::collections::HashSet;

use chrono::Utc;
use learnlog_core::errors::JournalError;
use learnlog_core::model::{EntryDraft, EntryId, JournalEntry, UserId};
use learnlog_core::repo::EntryRepository;
use learnlog_core::rules::slug;
use rusqlite::{params, Connection, OptionalExtension};

use super::hydration::{entry_from_row, to_millis, ENTRY_COLUMNS};
use crate::db::Session;
use crate::errors::{from_rusqlite, is_foreign_key_violation, Result};

impl EntryRepository for Session {
    fn insert_entry(&mut self, owner: UserId, draft: &EntryDraft) -> Result<JournalEntry> {
        let tx = self.write_tx()?;
        let slug = free_slug(&tx, owner, &draft.slug, None)?;

        tx.execute(
            "INSERT INTO journal_entries
                (user_id, title, slug, date, time_spent, learned, resources, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                owner.get(),
                draft.title,
                slug,
                draft.date,
                draft.time_spent,
                draft.learned,
                draft.resources,
                to_millis(Utc::now()),
            ],
        )
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                JournalError::validation("owner", "unknown user")
            } else {
                from_rusqlite(e)
            }
        })?;
        let id = EntryId(tx.last_insert_rowid());

        let entry = select_entry(&tx, id)?.ok_or(JournalError::Internal {
            message: format!("inserted entry {} not readable", id),
        })?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(entry)
    }

    fn get_entry(&self, id: EntryId) -> Result<Option<JournalEntry>> {
        select_entry(&self.conn, id)
    }

    fn find_entry_by_slug(&self, owner: UserId, slug: &str) -> Result<Option<JournalEntry>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM journal_entries e WHERE e.user_id = ?1 AND e.slug = ?2",
                    ENTRY_COLUMNS
                ),
                params![owner.get(), slug],
                entry_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    fn list_entries_by_owner(
        &self,
        owner: UserId,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>> {
        // SQLite reads a negative LIMIT as "no limit"
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM journal_entries e
                 WHERE e.user_id = ?1
                 ORDER BY e.date DESC, e.id ASC
                 LIMIT ?2",
                ENTRY_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let entries = stmt
            .query_map(params![owner.get(), limit], entry_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(entries)
    }

    fn update_entry(&mut self, id: EntryId, draft: &EntryDraft) -> Result<Option<JournalEntry>> {
        let tx = self.write_tx()?;
        let Some(current) = select_entry(&tx, id)? else {
            return Ok(None);
        };

        let slug = if current.title == draft.title {
            current.slug
        } else {
            free_slug(&tx, current.owner, &draft.slug, Some(id))?
        };

        tx.execute(
            "UPDATE journal_entries
             SET title = ?1, slug = ?2, date = ?3, time_spent = ?4, learned = ?5, resources = ?6
             WHERE id = ?7",
            params![
                draft.title,
                slug,
                draft.date,
                draft.time_spent,
                draft.learned,
                draft.resources,
                id.get(),
            ],
        )
        .map_err(from_rusqlite)?;

        let updated = select_entry(&tx, id)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(updated)
    }

    fn delete_entry(&mut self, id: EntryId) -> Result<bool> {
        let tx = self.write_tx()?;
        tx.execute("DELETE FROM entry_tags WHERE entry_id = ?", [id.get()])
            .map_err(from_rusqlite)?;
        let deleted = tx
            .execute("DELETE FROM journal_entries WHERE id = ?", [id.get()])
            .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }
}

fn select_entry(conn: &Connection, id: EntryId) -> Result<Option<JournalEntry>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM journal_entries e WHERE e.id = ?",
            ENTRY_COLUMNS
        ),
        [id.get()],
        entry_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}

/// First slug derived from `base` that none of the owner's other entries use
fn free_slug(
    conn: &Connection,
    owner: UserId,
    base: &str,
    except: Option<EntryId>,
) -> Result<String> {
    let mut stmt = conn
        .prepare(
            "SELECT slug FROM journal_entries
             WHERE user_id = ?1 AND (slug = ?2 OR slug LIKE ?2 || '-%') AND id != ?3",
        )
        .map_err(from_rusqlite)?;
    let taken = stmt
        .query_map(
            params![owner.get(), base, except.map_or(0, EntryId::get)],
            |row| row.get::<_, String>(0),
        )
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<HashSet<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(slug::first_free(base, |s| taken.contains(s)))
}
