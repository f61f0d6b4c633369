// Integration tests for the store operations against the in-memory backend.
// Covers the registration, scoping and tagging scenarios.

use chrono::NaiveDate;
use learnlog_core::errors::JournalError;
use learnlog_core::model::{EntryFields, Identity};
use learnlog_core::ops::{credential_ops, entry_ops, tag_ops};
use learnlog_core::MemoryStore;
use learnlog_core_types::Sensitive;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn register(store: &mut MemoryStore, email: &str) -> Identity {
    let user = credential_ops::register(store, email, Sensitive::new("pw123456")).unwrap();
    Identity::from(&user)
}

#[test]
fn test_register_then_authenticate() {
    // Given: a registered user
    let mut store = MemoryStore::new();
    credential_ops::register(&mut store, "a@example.com", Sensitive::new("pw123456")).unwrap();

    // When/Then: the right password authenticates
    let user =
        credential_ops::authenticate(&store, "a@example.com", Sensitive::new("pw123456")).unwrap();
    assert_eq!(user.email, "a@example.com");

    // And: a wrong password is rejected
    assert_eq!(
        credential_ops::authenticate(&store, "a@example.com", Sensitive::new("wrong-pw")),
        Err(JournalError::InvalidCredentials)
    );

    // And: an unknown email is not found
    assert!(matches!(
        credential_ops::authenticate(&store, "b@example.com", Sensitive::new("pw123456")),
        Err(JournalError::UserNotFound { .. })
    ));
}

#[test]
fn test_register_twice_same_email() {
    let mut store = MemoryStore::new();
    let first = credential_ops::register(&mut store, "a@example.com", Sensitive::new("pw123456"));
    let second =
        credential_ops::register(&mut store, "A@example.com", Sensitive::new("other-pass"));

    assert!(first.is_ok());
    assert_eq!(
        second,
        Err(JournalError::DuplicateUser {
            email: "a@example.com".into()
        })
    );
}

#[test]
fn test_list_entries_scoped_per_user() {
    // Given: two users with one entry each
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");
    let b = register(&mut store, "b@example.com");

    entry_ops::create_entry(
        &mut store,
        &a,
        &EntryFields::new("Day 1", date(2024, 1, 1), 60, "borrowing"),
    )
    .unwrap();
    entry_ops::create_entry(
        &mut store,
        &b,
        &EntryFields::new("Day 2", date(2024, 1, 2), 90, "lifetimes"),
    )
    .unwrap();

    // Then: each sees only their own
    let a_titles: Vec<String> = entry_ops::list_entries(&store, &a, None)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    let b_titles: Vec<String> = entry_ops::list_entries(&store, &b, None)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(a_titles, ["Day 1"]);
    assert_eq!(b_titles, ["Day 2"]);
}

#[test]
fn test_list_entries_order_and_limit() {
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");

    for (title, day) in [("mid", 5), ("old", 1), ("new", 9), ("mid-again", 5)] {
        entry_ops::create_entry(
            &mut store,
            &a,
            &EntryFields::new(title, date(2024, 3, day), 10, "x"),
        )
        .unwrap();
    }

    let titles: Vec<String> = entry_ops::list_entries(&store, &a, None)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    // Same-day entries keep insertion order
    assert_eq!(titles, ["new", "mid", "mid-again", "old"]);

    let limited = entry_ops::list_entries(&store, &a, Some(2)).unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].title, "new");
}

#[test]
fn test_edit_by_other_user_forbidden_and_unchanged() {
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");
    let b = register(&mut store, "b@example.com");
    let entry = entry_ops::create_entry(
        &mut store,
        &a,
        &EntryFields::new("Day 1", date(2024, 1, 1), 60, "borrowing"),
    )
    .unwrap();

    let result = entry_ops::edit_entry(
        &mut store,
        entry.id,
        &b,
        &EntryFields::new("Hijacked", date(2024, 1, 1), 1, "nothing"),
    );

    assert_eq!(
        result,
        Err(JournalError::Forbidden {
            entry_id: entry.id.get()
        })
    );
    assert_eq!(entry_ops::get_entry(&store, entry.id).unwrap(), entry);
}

#[test]
fn test_owner_edits_in_place() {
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");
    let entry = entry_ops::create_entry(
        &mut store,
        &a,
        &EntryFields::new("Day 1", date(2024, 1, 1), 60, "borrowing"),
    )
    .unwrap();

    let edited = entry_ops::edit_entry(
        &mut store,
        entry.id,
        &a,
        &EntryFields::new("Day One", date(2024, 1, 3), 75, "borrowing, again")
            .with_resources("The Book"),
    )
    .unwrap();

    assert_eq!(edited.id, entry.id);
    assert_eq!(edited.owner, entry.owner);
    assert_eq!(edited.slug, "day-one");
    assert_eq!(edited.time_spent, 75);
    assert_eq!(edited.resources, "The Book");
    assert_eq!(edited.created_at, entry.created_at);
}

#[test]
fn test_delete_entry() {
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");
    let b = register(&mut store, "b@example.com");
    let entry = entry_ops::create_entry(
        &mut store,
        &a,
        &EntryFields::new("Day 1", date(2024, 1, 1), 60, "borrowing"),
    )
    .unwrap();
    tag_ops::attach_tags(&mut store, entry.id, &["rust"]).unwrap();

    // Not the owner
    assert!(matches!(
        entry_ops::delete_entry(&mut store, entry.id, &b),
        Err(JournalError::Forbidden { .. })
    ));

    // Owner
    entry_ops::delete_entry(&mut store, entry.id, &a).unwrap();
    assert!(matches!(
        entry_ops::get_entry(&store, entry.id),
        Err(JournalError::EntryNotFound { .. })
    ));
    assert!(tag_ops::list_entries_for_tag(&store, "rust")
        .unwrap()
        .is_empty());

    // Twice
    assert!(matches!(
        entry_ops::delete_entry(&mut store, entry.id, &a),
        Err(JournalError::EntryNotFound { .. })
    ));
}

#[test]
fn test_tag_scenario() {
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");
    let b = register(&mut store, "b@example.com");
    let e = entry_ops::create_entry(
        &mut store,
        &a,
        &EntryFields::new("E", date(2024, 1, 1), 5, "x"),
    )
    .unwrap();
    let f = entry_ops::create_entry(
        &mut store,
        &b,
        &EntryFields::new("F", date(2024, 2, 1), 5, "y"),
    )
    .unwrap();

    // Create "python" and attach to E
    tag_ops::create_tag(&mut store, "python").unwrap();
    tag_ops::attach_tags(&mut store, e.id, &["python"]).unwrap();

    let tagged = tag_ops::list_entries_for_tag(&store, "python").unwrap();
    assert_eq!(tagged, vec![e.clone()]);

    // Creating it again fails
    assert_eq!(
        tag_ops::create_tag(&mut store, "Python"),
        Err(JournalError::DuplicateTag {
            name: "python".into()
        })
    );

    // Tag browsing crosses owners
    tag_ops::attach_tags(&mut store, f.id, &["python"]).unwrap();
    let tagged = tag_ops::list_entries_for_tag(&store, "python").unwrap();
    assert_eq!(tagged, vec![f, e]);
}

#[test]
fn test_attach_is_idempotent() {
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");
    let e = entry_ops::create_entry(
        &mut store,
        &a,
        &EntryFields::new("E", date(2024, 1, 1), 5, "x"),
    )
    .unwrap();

    tag_ops::attach_tags(&mut store, e.id, &["rust", "sql"]).unwrap();
    tag_ops::attach_tags(&mut store, e.id, &["rust"]).unwrap();

    let tags = tag_ops::list_tags_for_entry(&store, e.id).unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["rust", "sql"]);
}

#[test]
fn test_attach_as_checks_owner() {
    let mut store = MemoryStore::new();
    let a = register(&mut store, "a@example.com");
    let b = register(&mut store, "b@example.com");
    let e = entry_ops::create_entry(
        &mut store,
        &a,
        &EntryFields::new("E", date(2024, 1, 1), 5, "x"),
    )
    .unwrap();

    assert!(matches!(
        tag_ops::attach_tags_as(&mut store, &b, e.id, &["rust"]),
        Err(JournalError::Forbidden { .. })
    ));
    assert!(tag_ops::list_tags(&store).unwrap().is_empty());

    tag_ops::attach_tags_as(&mut store, &a, e.id, &["rust"]).unwrap();
    let detail = entry_ops::get_entry_detail(&store, e.id).unwrap();
    assert_eq!(detail.tags.len(), 1);
}
