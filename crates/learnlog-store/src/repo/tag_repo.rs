use learnlog_core::errors::JournalError;
use learnlog_core::model::{EntryId, JournalEntry, Tag, TagId};
use learnlog_core::repo::TagRepository;
use rusqlite::{params, Connection, OptionalExtension};

use super::hydration::{entry_from_row, tag_from_row, ENTRY_COLUMNS, TAG_COLUMNS};
use crate::db::Session;
use crate::errors::{from_rusqlite, is_unique_violation, Result};

impl TagRepository for Session {
    fn insert_tag(&mut self, name: &str) -> Result<Tag> {
        let tx = self.write_tx()?;
        tx.execute("INSERT INTO tags (name) VALUES (?)", [name])
            .map_err(|e| {
                if is_unique_violation(&e, "tags.name") {
                    JournalError::DuplicateTag {
                        name: name.to_string(),
                    }
                } else {
                    from_rusqlite(e)
                }
            })?;
        let tag = Tag {
            id: TagId(tx.last_insert_rowid()),
            name: name.to_string(),
        };
        tx.commit().map_err(from_rusqlite)?;
        Ok(tag)
    }

    fn find_tag(&self, name: &str) -> Result<Option<Tag>> {
        select_tag(&self.conn, name)
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM tags t ORDER BY t.name", TAG_COLUMNS))
            .map_err(from_rusqlite)?;
        let tags = stmt
            .query_map([], tag_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(tags)
    }

    fn attach_tags(&mut self, entry: EntryId, names: &[String]) -> Result<Vec<Tag>> {
        let tx = self.write_tx()?;
        let exists = tx
            .query_row(
                "SELECT 1 FROM journal_entries WHERE id = ?",
                [entry.get()],
                |_| Ok(()),
            )
            .optional()
            .map_err(from_rusqlite)?
            .is_some();
        if !exists {
            return Err(JournalError::EntryNotFound {
                entry_id: entry.get(),
            });
        }

        let mut attached = Vec::with_capacity(names.len());
        for name in names {
            tx.execute(
                "INSERT INTO tags (name) VALUES (?) ON CONFLICT(name) DO NOTHING",
                [name],
            )
            .map_err(from_rusqlite)?;
            let tag = select_tag(&tx, name)?.ok_or_else(|| JournalError::Internal {
                message: format!("tag {} vanished during attach", name),
            })?;
            tx.execute(
                "INSERT OR IGNORE INTO entry_tags (entry_id, tag_id) VALUES (?1, ?2)",
                params![entry.get(), tag.id.get()],
            )
            .map_err(from_rusqlite)?;
            attached.push(tag);
        }

        tx.commit().map_err(from_rusqlite)?;
        Ok(attached)
    }

    fn detach_tag(&mut self, entry: EntryId, tag: TagId) -> Result<bool> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM entry_tags WHERE entry_id = ?1 AND tag_id = ?2",
                params![entry.get(), tag.get()],
            )
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    fn entries_for_tag(&self, tag: TagId) -> Result<Vec<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM journal_entries e
                 JOIN entry_tags et ON et.entry_id = e.id
                 WHERE et.tag_id = ?
                 ORDER BY e.date DESC, e.id ASC",
                ENTRY_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let entries = stmt
            .query_map([tag.get()], entry_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(entries)
    }

    fn tags_for_entry(&self, entry: EntryId) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM tags t
                 JOIN entry_tags et ON et.tag_id = t.id
                 WHERE et.entry_id = ?
                 ORDER BY t.name",
                TAG_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let tags = stmt
            .query_map([entry.get()], tag_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(tags)
    }
}

fn select_tag(conn: &Connection, name: &str) -> Result<Option<Tag>> {
    conn.query_row(
        &format!("SELECT {} FROM tags t WHERE t.name = ?", TAG_COLUMNS),
        [name],
        tag_from_row,
    )
    .optional()
    .map_err(from_rusqlite)
}
