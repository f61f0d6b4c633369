use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use super::{newest_first, EntryRepository, TagRepository, UserRepository};
use crate::errors::{JournalError, Result};
use crate::model::{EntryDraft, EntryId, JournalEntry, PasswordHash, Tag, TagId, User, UserId};
use crate::rules::slug;

/// In-memory backend for all three repositories
///
/// Arena-style maps keyed by monotonically increasing ids. Not thread-safe;
/// share it behind a `Mutex` and hold the lock for a whole operation to get
/// the same atomicity a transactional backend gives.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: BTreeMap<UserId, User>,
    entries: BTreeMap<EntryId, JournalEntry>,
    tags: BTreeMap<TagId, Tag>,
    /// Join relation; the set makes each (entry, tag) pair unique
    entry_tags: BTreeSet<(EntryId, TagId)>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn slug_taken(&self, owner: UserId, slug: &str, except: Option<EntryId>) -> bool {
        self.entries
            .values()
            .any(|e| e.owner == owner && e.slug == slug && Some(e.id) != except)
    }

    fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.values().find(|t| t.name == name)
    }
}

impl UserRepository for MemoryStore {
    fn insert_user(&mut self, email: &str, password_hash: &PasswordHash) -> Result<User> {
        if self.users.values().any(|u| u.email == email) {
            return Err(JournalError::DuplicateUser {
                email: email.to_string(),
            });
        }

        let user = User {
            id: UserId(self.next_id()),
            email: email.to_string(),
            password_hash: password_hash.clone(),
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.values().find(|u| u.email == email).cloned())
    }
}

impl EntryRepository for MemoryStore {
    fn insert_entry(&mut self, owner: UserId, draft: &EntryDraft) -> Result<JournalEntry> {
        if !self.users.contains_key(&owner) {
            return Err(JournalError::validation("owner", "unknown user"));
        }

        let slug = slug::first_free(&draft.slug, |s| self.slug_taken(owner, s, None));
        let entry = JournalEntry {
            id: EntryId(self.next_id()),
            owner,
            title: draft.title.clone(),
            slug,
            date: draft.date,
            time_spent: draft.time_spent,
            learned: draft.learned.clone(),
            resources: draft.resources.clone(),
            created_at: Utc::now(),
        };
        self.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn get_entry(&self, id: EntryId) -> Result<Option<JournalEntry>> {
        Ok(self.entries.get(&id).cloned())
    }

    fn find_entry_by_slug(&self, owner: UserId, slug: &str) -> Result<Option<JournalEntry>> {
        Ok(self
            .entries
            .values()
            .find(|e| e.owner == owner && e.slug == slug)
            .cloned())
    }

    fn list_entries_by_owner(
        &self,
        owner: UserId,
        limit: Option<usize>,
    ) -> Result<Vec<JournalEntry>> {
        let mut entries: Vec<JournalEntry> = self
            .entries
            .values()
            .filter(|e| e.owner == owner)
            .cloned()
            .collect();
        entries.sort_by(newest_first);
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    fn update_entry(&mut self, id: EntryId, draft: &EntryDraft) -> Result<Option<JournalEntry>> {
        let Some(current) = self.entries.get(&id) else {
            return Ok(None);
        };

        let slug = if current.title == draft.title {
            current.slug.clone()
        } else {
            let owner = current.owner;
            slug::first_free(&draft.slug, |s| self.slug_taken(owner, s, Some(id)))
        };

        let Some(entry) = self.entries.get_mut(&id) else {
            return Ok(None);
        };
        entry.title = draft.title.clone();
        entry.slug = slug;
        entry.date = draft.date;
        entry.time_spent = draft.time_spent;
        entry.learned = draft.learned.clone();
        entry.resources = draft.resources.clone();
        Ok(Some(entry.clone()))
    }

    fn delete_entry(&mut self, id: EntryId) -> Result<bool> {
        if self.entries.remove(&id).is_none() {
            return Ok(false);
        }
        self.entry_tags.retain(|(entry, _)| *entry != id);
        Ok(true)
    }
}

impl TagRepository for MemoryStore {
    fn insert_tag(&mut self, name: &str) -> Result<Tag> {
        if self.tag_by_name(name).is_some() {
            return Err(JournalError::DuplicateTag {
                name: name.to_string(),
            });
        }

        let tag = Tag {
            id: TagId(self.next_id()),
            name: name.to_string(),
        };
        self.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    fn find_tag(&self, name: &str) -> Result<Option<Tag>> {
        Ok(self.tag_by_name(name).cloned())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut tags: Vec<Tag> = self.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn attach_tags(&mut self, entry: EntryId, names: &[String]) -> Result<Vec<Tag>> {
        if !self.entries.contains_key(&entry) {
            return Err(JournalError::EntryNotFound {
                entry_id: entry.get(),
            });
        }

        let mut attached = Vec::with_capacity(names.len());
        for name in names {
            let tag = match self.tag_by_name(name) {
                Some(tag) => tag.clone(),
                None => self.insert_tag(name)?,
            };
            self.entry_tags.insert((entry, tag.id));
            attached.push(tag);
        }
        Ok(attached)
    }

    fn detach_tag(&mut self, entry: EntryId, tag: TagId) -> Result<bool> {
        Ok(self.entry_tags.remove(&(entry, tag)))
    }

    fn entries_for_tag(&self, tag: TagId) -> Result<Vec<JournalEntry>> {
        let mut entries: Vec<JournalEntry> = self
            .entry_tags
            .iter()
            .filter(|(_, t)| *t == tag)
            .filter_map(|(e, _)| self.entries.get(e).cloned())
            .collect();
        entries.sort_by(newest_first);
        Ok(entries)
    }

    fn tags_for_entry(&self, entry: EntryId) -> Result<Vec<Tag>> {
        let mut tags: Vec<Tag> = self
            .entry_tags
            .range((entry, TagId(i64::MIN))..=(entry, TagId(i64::MAX)))
            .filter_map(|(_, t)| self.tags.get(t).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}
