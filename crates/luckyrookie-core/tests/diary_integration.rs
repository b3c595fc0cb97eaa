//! Diary, clover ledger and breathing record sharing one database file.

use std::cell::Cell;

use chrono::NaiveDate;
use luckyrookie_core::breathing::record::add_cycles;
use luckyrookie_core::diary::{DiaryBook, DiaryDraft, DiaryEditor, LoadSource, SaveOutcome};
use luckyrookie_core::error::StoreError;
use luckyrookie_core::{Database, DiaryEntry, KeyValueStore};
use tempfile::TempDir;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
}

#[test]
fn clovers_survive_reopen() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("LUCKYROOKIE_DATA_DIR", dir.path());

    {
        let db = Database::open().unwrap();
        let book = DiaryBook::new(&db);
        book.save(date(1), &DiaryEntry::default()).unwrap();
        book.save(date(2), &DiaryEntry::default()).unwrap();
    }

    let db = Database::open().unwrap();
    let book = DiaryBook::new(&db);
    assert_eq!(book.clovers().balance(), 2);
    let again = book.save(date(2), &DiaryEntry::default()).unwrap();
    assert!(!again.clover_earned);
    assert_eq!(again.clovers, 2);
}

#[test]
fn photo_round_trip_keeps_text() {
    let db = Database::open_memory().unwrap();
    let before = DiaryEditor::new(&db, date(5));
    let typed = DiaryEntry {
        song: "Here Comes the Sun".into(),
        artist: "The Beatles".into(),
        lucky_note: "Bus came right away".into(),
        ..DiaryEntry::default()
    };
    before.stash_for_photo(&typed).unwrap();

    let after = DiaryEditor::new(&db, date(5)).with_photo("file:///tmp/shot.jpg");
    let opened = after.open();
    assert_eq!(opened.source, LoadSource::Draft);
    assert_eq!(opened.entry.lucky_note, "Bus came right away");
    assert_eq!(opened.entry.photo_uri.as_deref(), Some("file:///tmp/shot.jpg"));

    let outcome = after.save(&opened.entry).unwrap();
    assert!(outcome.clover_earned);
    assert!(DiaryBook::new(&db).take_draft(date(5)).unwrap().is_none());
}

#[test]
fn editor_shows_breathing_for_same_date() {
    let db = Database::open_memory().unwrap();
    add_cycles(&db, date(7), 4, "Box Breathing", chrono::Utc::now()).unwrap();
    DiaryBook::new(&db)
        .stash_draft(date(8), &DiaryDraft::default())
        .unwrap();

    let opened = DiaryEditor::new(&db, date(7)).open().clone();
    assert_eq!(opened.source, LoadSource::Empty);
    assert_eq!(opened.breathing.total_cycles, 4);
    assert_eq!(opened.breathing.last_pattern_name, "Box Breathing");
}

/// Rejects writes to the rewarded-dates list until `locked` is cleared.
struct LockedDates {
    db: Database,
    locked: Cell<bool>,
}

impl KeyValueStore for LockedDates {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.db.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.locked.get() && key == "lucky-rookie-diary-dates" {
            return Err(StoreError::QueryFailed("database is locked".into()));
        }
        self.db.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.db.remove(key)
    }
}

#[test]
fn failed_date_mark_never_double_awards() {
    let store = LockedDates {
        db: Database::open_memory().unwrap(),
        locked: Cell::new(true),
    };
    let book = DiaryBook::new(&store);

    let first = book.save(date(9), &DiaryEntry::default()).unwrap();
    assert_eq!(first, SaveOutcome { clover_earned: false, clovers: 0 });
    assert!(book.load(date(9)).is_some());

    store.locked.set(false);
    let second = book.save(date(9), &DiaryEntry::default()).unwrap();
    assert_eq!(second, SaveOutcome { clover_earned: true, clovers: 1 });

    let third = book.save(date(9), &DiaryEntry::default()).unwrap();
    assert_eq!(third, SaveOutcome { clover_earned: false, clovers: 1 });
    assert_eq!(book.clovers().balance(), 1);
}
