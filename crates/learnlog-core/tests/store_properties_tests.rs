// Property tests for ordering, scoping and uniqueness.

use std::sync::{Arc, Mutex};
use std::thread;

use chrono::NaiveDate;
use learnlog_core::errors::JournalError;
use learnlog_core::model::{EntryFields, Identity};
use learnlog_core::ops::{credential_ops, entry_ops, tag_ops};
use learnlog_core::MemoryStore;
use learnlog_core_types::Sensitive;
use proptest::prelude::*;

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(offset))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_list_sorted_newest_first(offsets in prop::collection::vec(0u32..60, 1..20)) {
        let mut store = MemoryStore::new();
        let user = credential_ops::register(&mut store, "p@example.com", Sensitive::new("pw123456")).unwrap();
        let me = Identity::from(&user);

        for (i, offset) in offsets.iter().enumerate() {
            entry_ops::create_entry(
                &mut store,
                &me,
                &EntryFields::new(format!("entry {}", i), day(*offset), 1, "x"),
            ).unwrap();
        }

        let listed = entry_ops::list_entries(&store, &me, None).unwrap();
        prop_assert_eq!(listed.len(), offsets.len());
        for pair in listed.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date);
            if pair[0].date == pair[1].date {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn prop_list_never_leaks_other_owner(owners in prop::collection::vec(0usize..3, 1..25)) {
        let mut store = MemoryStore::new();
        let users: Vec<Identity> = (0..3)
            .map(|i| {
                let user = credential_ops::register(
                    &mut store,
                    &format!("u{}@example.com", i),
                    Sensitive::new("pw123456"),
                ).unwrap();
                Identity::from(&user)
            })
            .collect();

        for (i, owner) in owners.iter().enumerate() {
            entry_ops::create_entry(
                &mut store,
                &users[*owner],
                &EntryFields::new(format!("e{}", i), day(i as u32), 1, "x"),
            ).unwrap();
        }

        for (i, user) in users.iter().enumerate() {
            let listed = entry_ops::list_entries(&store, user, None).unwrap();
            prop_assert!(listed.iter().all(|e| e.owner == user.user_id));
            prop_assert_eq!(listed.len(), owners.iter().filter(|o| **o == i).count());
        }
    }

    #[test]
    fn prop_repeated_attach_keeps_one_association(repeats in 1usize..6) {
        let mut store = MemoryStore::new();
        let user = credential_ops::register(&mut store, "t@example.com", Sensitive::new("pw123456")).unwrap();
        let me = Identity::from(&user);
        let entry = entry_ops::create_entry(&mut store, &me, &EntryFields::new("E", day(0), 1, "x")).unwrap();

        for _ in 0..repeats {
            tag_ops::attach_tags(&mut store, entry.id, &["rust"]).unwrap();
        }

        prop_assert_eq!(tag_ops::list_tags_for_entry(&store, entry.id).unwrap().len(), 1);
        prop_assert_eq!(tag_ops::list_entries_for_tag(&store, "rust").unwrap().len(), 1);
    }
}

#[test]
fn test_concurrent_registration_single_winner() {
    let store = Arc::new(Mutex::new(MemoryStore::new()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut guard = store.lock().unwrap();
                credential_ops::register(&mut *guard, "race@example.com", Sensitive::new("pw123456"))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let wins = results.iter().filter(|r| r.is_ok()).count();
    let dups = results
        .iter()
        .filter(|r| matches!(r, Err(JournalError::DuplicateUser { .. })))
        .count();
    assert_eq!(wins, 1);
    assert_eq!(dups, 7);
}
