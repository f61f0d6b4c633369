//! Owner-scoped journal entry operations

use std::time::Instant;

use super::elapsed_ms;
use crate::errors::{JournalError, Result};
use crate::model::{EntryDetail, EntryFields, EntryId, Identity, JournalEntry};
use crate::repo::{EntryRepository, TagRepository};
use crate::rules::validation;
use crate::{log_op_end, log_op_error, log_op_start};

/// Create an entry owned by `owner`
///
/// # Errors
///
/// * `Validation` - a required field is missing or malformed
/// * `StorageUnavailable` - backend failure
pub fn create_entry<R: EntryRepository>(
    repo: &mut R,
    owner: &Identity,
    fields: &EntryFields,
) -> Result<JournalEntry> {
    log_op_start!("create_entry", user_id = owner.user_id.get());
    let start = Instant::now();

    let result = validation::validate_entry(fields)
        .and_then(|draft| repo.insert_entry(owner.user_id, &draft))
        .map_err(|e| {
            log_op_error!("create_entry", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "create_entry",
        duration_ms = elapsed_ms(start),
        entry_id = result.id.get()
    );
    Ok(result)
}

/// Fetch an entry by id, regardless of owner
///
/// # Errors
///
/// * `EntryNotFound` - no entry with that id
/// * `StorageUnavailable` - backend failure
pub fn get_entry<R: EntryRepository>(repo: &R, id: EntryId) -> Result<JournalEntry> {
    repo.get_entry(id)?.ok_or(JournalError::EntryNotFound { entry_id: id.get() })
}

/// Fetch one of the caller's entries by slug
///
/// # Errors
///
/// * `EntrySlugNotFound` - the caller has no entry with that slug
/// * `StorageUnavailable` - backend failure
pub fn get_entry_by_slug<R: EntryRepository>(
    repo: &R,
    owner: &Identity,
    slug: &str,
) -> Result<JournalEntry> {
    repo.find_entry_by_slug(owner.user_id, slug)?
        .ok_or_else(|| JournalError::EntrySlugNotFound {
            slug: slug.to_string(),
        })
}

/// An entry with its tags, for a detail view
///
/// # Errors
///
/// * `EntryNotFound` - no entry with that id
/// * `StorageUnavailable` - backend failure
pub fn get_entry_detail<R>(repo: &R, id: EntryId) -> Result<EntryDetail>
where
    R: EntryRepository + TagRepository,
{
    let entry = get_entry(repo, id)?;
    let tags = repo.tags_for_entry(id)?;
    Ok(EntryDetail { entry, tags })
}

/// The caller's entries, newest first, optionally truncated to `limit`
///
/// Never returns another user's entries.
///
/// # Errors
///
/// * `StorageUnavailable` - backend failure
pub fn list_entries<R: EntryRepository>(
    repo: &R,
    owner: &Identity,
    limit: Option<usize>,
) -> Result<Vec<JournalEntry>> {
    log_op_start!("list_entries", user_id = owner.user_id.get());
    let start = Instant::now();

    let result = repo
        .list_entries_by_owner(owner.user_id, limit)
        .map_err(|e| {
            log_op_error!("list_entries", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "list_entries",
        duration_ms = elapsed_ms(start),
        result_len = result.len() as u64
    );
    Ok(result)
}

/// Overwrite the mutable fields of one of the caller's entries
///
/// Ownership is checked before the fields are validated, so a foreign
/// caller always sees `Forbidden` and the entry is left untouched.
///
/// # Errors
///
/// * `EntryNotFound` - no entry with that id
/// * `Forbidden` - the entry belongs to another user
/// * `Validation` - a required field is missing or malformed
/// * `StorageUnavailable` - backend failure
pub fn edit_entry<R: EntryRepository>(
    repo: &mut R,
    id: EntryId,
    owner: &Identity,
    fields: &EntryFields,
) -> Result<JournalEntry> {
    log_op_start!(
        "edit_entry",
        entry_id = id.get(),
        user_id = owner.user_id.get()
    );
    let start = Instant::now();

    let result = edit_entry_impl(repo, id, owner, fields).map_err(|e| {
        log_op_error!("edit_entry", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!("edit_entry", duration_ms = elapsed_ms(start));
    Ok(result)
}

fn edit_entry_impl<R: EntryRepository>(
    repo: &mut R,
    id: EntryId,
    owner: &Identity,
    fields: &EntryFields,
) -> Result<JournalEntry> {
    ensure_owned(&*repo, id, owner)?;
    let draft = validation::validate_entry(fields)?;
    repo.update_entry(id, &draft)?
        .ok_or(JournalError::EntryNotFound { entry_id: id.get() })
}

/// Delete one of the caller's entries along with its tag associations
///
/// # Errors
///
/// * `EntryNotFound` - no entry with that id
/// * `Forbidden` - the entry belongs to another user
/// * `StorageUnavailable` - backend failure
pub fn delete_entry<R: EntryRepository>(
    repo: &mut R,
    id: EntryId,
    owner: &Identity,
) -> Result<()> {
    log_op_start!(
        "delete_entry",
        entry_id = id.get(),
        user_id = owner.user_id.get()
    );
    let start = Instant::now();

    let result = ensure_owned(&*repo, id, owner)
        .and_then(|_| repo.delete_entry(id))
        .and_then(|deleted| {
            if deleted {
                Ok(())
            } else {
                Err(JournalError::EntryNotFound { entry_id: id.get() })
            }
        });

    match result {
        Ok(()) => {
            log_op_end!("delete_entry", duration_ms = elapsed_ms(start));
            Ok(())
        }
        Err(e) => {
            log_op_error!("delete_entry", e.clone(), duration_ms = elapsed_ms(start));
            Err(e)
        }
    }
}

/// Load an entry and check that `owner` owns it
///
/// # Errors
///
/// * `EntryNotFound` - no entry with that id
/// * `Forbidden` - the entry belongs to another user
pub(crate) fn ensure_owned<R: EntryRepository>(
    repo: &R,
    id: EntryId,
    owner: &Identity,
) -> Result<JournalEntry> {
    let entry = get_entry(repo, id)?;
    if !owner.owns(entry.owner) {
        return Err(JournalError::Forbidden { entry_id: id.get() });
    }
    Ok(entry)
}
