//! Tags and the entry/tag association
//!
//! Tags are global: browsing entries by tag crosses owners. Only the
//! owner-checked variants (`attach_tags_as`, `detach_tag`) look at who is asking.

use std::time::Instant;

use super::elapsed_ms;
use super::entry_ops::{ensure_owned, get_entry};
use crate::errors::{JournalError, Result};
use crate::model::{EntryId, Identity, JournalEntry, Tag};
use crate::repo::{EntryRepository, TagRepository};
use crate::rules::validation;
use crate::{log_op_end, log_op_error, log_op_start};

/// Create a tag
///
/// # Errors
///
/// * `Validation` - blank name
/// * `DuplicateTag` - a tag with the same normalised name exists
/// * `StorageUnavailable` - backend failure
pub fn create_tag<R: TagRepository>(repo: &mut R, name: &str) -> Result<Tag> {
    log_op_start!("create_tag", tag = name);
    let start = Instant::now();

    let result = validation::normalize_tag_name(name)
        .and_then(|name| repo.insert_tag(&name))
        .map_err(|e| {
            log_op_error!("create_tag", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "create_tag",
        duration_ms = elapsed_ms(start),
        tag_id = result.id.get()
    );
    Ok(result)
}

/// Attach tags to an entry, creating any that do not exist yet
///
/// Names are normalised and de-duplicated first. Attaching a tag that is
/// already on the entry is a no-op.
///
/// # Errors
///
/// * `Validation` - a blank name
/// * `EntryNotFound` - no entry with that id
/// * `StorageUnavailable` - backend failure
pub fn attach_tags<R, S>(repo: &mut R, entry: EntryId, names: &[S]) -> Result<Vec<Tag>>
where
    R: TagRepository,
    S: AsRef<str>,
{
    log_op_start!(
        "attach_tags",
        entry_id = entry.get(),
        tag_count = names.len() as u64
    );
    let start = Instant::now();

    let result = normalize_names(names)
        .and_then(|names| repo.attach_tags(entry, &names))
        .map_err(|e| {
            log_op_error!("attach_tags", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!("attach_tags", duration_ms = elapsed_ms(start));
    Ok(result)
}

/// [`attach_tags`] restricted to the entry's owner
///
/// # Errors
///
/// As [`attach_tags`], plus `Forbidden` if the entry belongs to another user.
pub fn attach_tags_as<R, S>(
    repo: &mut R,
    owner: &Identity,
    entry: EntryId,
    names: &[S],
) -> Result<Vec<Tag>>
where
    R: EntryRepository + TagRepository,
    S: AsRef<str>,
{
    ensure_owned(&*repo, entry, owner)?;
    attach_tags(repo, entry, names)
}

/// Remove a tag from one of the caller's entries
///
/// Returns whether an association was removed; removing an absent tag is not
/// an error.
///
/// # Errors
///
/// * `EntryNotFound` - no entry with that id
/// * `Forbidden` - the entry belongs to another user
/// * `StorageUnavailable` - backend failure
pub fn detach_tag<R>(repo: &mut R, owner: &Identity, entry: EntryId, name: &str) -> Result<bool>
where
    R: EntryRepository + TagRepository,
{
    ensure_owned(&*repo, entry, owner)?;
    let name = validation::normalize_tag_name(name)?;
    match repo.find_tag(&name)? {
        Some(tag) => repo.detach_tag(entry, tag.id),
        None => Ok(false),
    }
}

/// Every entry carrying the tag, across all owners, newest first
///
/// # Errors
///
/// * `TagNotFound` - no tag with that name
/// * `StorageUnavailable` - backend failure
pub fn list_entries_for_tag<R: TagRepository>(repo: &R, name: &str) -> Result<Vec<JournalEntry>> {
    log_op_start!("list_entries_for_tag", tag = name);
    let start = Instant::now();

    let result = list_entries_for_tag_impl(repo, name).map_err(|e| {
        log_op_error!(
            "list_entries_for_tag",
            e.clone(),
            duration_ms = elapsed_ms(start)
        );
        e
    })?;

    log_op_end!(
        "list_entries_for_tag",
        duration_ms = elapsed_ms(start),
        result_len = result.len() as u64
    );
    Ok(result)
}

fn list_entries_for_tag_impl<R: TagRepository>(repo: &R, name: &str) -> Result<Vec<JournalEntry>> {
    let name = validation::normalize_tag_name(name)?;
    let tag = repo
        .find_tag(&name)?
        .ok_or(JournalError::TagNotFound { name })?;
    repo.entries_for_tag(tag.id)
}

/// Tags on an entry (sorted by name for stable display)
///
/// # Errors
///
/// * `EntryNotFound` - no entry with that id
/// * `StorageUnavailable` - backend failure
pub fn list_tags_for_entry<R>(repo: &R, entry: EntryId) -> Result<Vec<Tag>>
where
    R: EntryRepository + TagRepository,
{
    get_entry(repo, entry)?;
    repo.tags_for_entry(entry)
}

/// All tags, sorted by name
///
/// # Errors
///
/// * `StorageUnavailable` - backend failure
pub fn list_tags<R: TagRepository>(repo: &R) -> Result<Vec<Tag>> {
    repo.list_tags()
}

fn normalize_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = validation::normalize_tag_name(name.as_ref())?;
        if !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    Ok(normalized)
}
