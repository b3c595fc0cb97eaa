//! Lucky diary: one entry per date, a draft stash for the camera round-trip,
//! and the clover reward for the first save of each date.

mod clover;

pub use clover::CloverLedger;

use std::cell::OnceCell;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::breathing::record::{self, DailyBreathingRecord};
use crate::error::{CoreError, StoreError};
use crate::events::Event;
use crate::storage::{keys, KeyValueStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub lucky_note: String,
    #[serde(default)]
    pub photo_uri: Option<String>,
    #[serde(default)]
    pub album_art: Option<String>,
}

/// Diary text kept aside while the photo flow is open. Never carries a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryDraft {
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub lucky_note: String,
    #[serde(default)]
    pub album_art: Option<String>,
}

impl From<&DiaryEntry> for DiaryDraft {
    fn from(entry: &DiaryEntry) -> Self {
        Self {
            song: entry.song.clone(),
            artist: entry.artist.clone(),
            lucky_note: entry.lucky_note.clone(),
            album_art: entry.album_art.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub clover_earned: bool,
    pub clovers: u64,
}

impl SaveOutcome {
    pub fn message(&self) -> String {
        if self.clover_earned {
            format!("+1 Clover earned! Total: {}", self.clovers)
        } else {
            "Diary saved successfully!".to_string()
        }
    }

    pub fn event(&self, date: NaiveDate) -> Event {
        Event::DiarySaved {
            date,
            clover_earned: self.clover_earned,
            clovers: self.clovers,
            at: Utc::now(),
        }
    }
}

pub struct DiaryBook<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> DiaryBook<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn clovers(&self) -> CloverLedger<'a> {
        CloverLedger::new(self.store)
    }

    /// Saved entry for `date`. Read and decode failures read as none.
    pub fn load(&self, date: NaiveDate) -> Option<DiaryEntry> {
        let key = keys::diary(date);
        let raw = self.store.get_soft(&key)?;
        serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!(%key, error = %e, "undecodable diary entry"))
            .ok()
    }

    /// Write the entry, then award a clover if this date has none yet.
    ///
    /// # Errors
    /// Fails if the entry itself cannot be written. Ledger failures after a
    /// successful write are logged and reported as "no clover".
    pub fn save(&self, date: NaiveDate, entry: &DiaryEntry) -> Result<SaveOutcome, CoreError> {
        let json = serde_json::to_string(entry)?;
        self.store.set(&keys::diary(date), &json)?;

        let ledger = self.clovers();
        let outcome = match ledger.award_once(date) {
            Ok(Some(total)) => SaveOutcome {
                clover_earned: true,
                clovers: total,
            },
            Ok(None) => SaveOutcome {
                clover_earned: false,
                clovers: ledger.balance(),
            },
            Err(e) => {
                tracing::warn!(%date, error = %e, "clover award failed");
                SaveOutcome {
                    clover_earned: false,
                    clovers: ledger.balance(),
                }
            }
        };
        Ok(outcome)
    }

    pub fn stash_draft(&self, date: NaiveDate, draft: &DiaryDraft) -> Result<(), CoreError> {
        let json = serde_json::to_string(draft)?;
        self.store.set(&keys::diary_draft(date), &json)?;
        Ok(())
    }

    /// Pop the stashed draft. The key is removed even if the draft cannot
    /// be decoded.
    pub fn take_draft(&self, date: NaiveDate) -> Result<Option<DiaryDraft>, StoreError> {
        let key = keys::diary_draft(date);
        let Some(raw) = self.store.get_soft(&key) else {
            return Ok(None);
        };
        self.store.remove(&key)?;
        Ok(serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!(%key, error = %e, "undecodable diary draft"))
            .ok())
    }

    pub fn breathing(&self, date: NaiveDate) -> DailyBreathingRecord {
        record::load_daily(self.store, date)
    }
}

/// Where the editor's contents came from when the date was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSource {
    Draft,
    Saved,
    Empty,
}

impl LoadSource {
    pub fn message(self) -> &'static str {
        match self {
            LoadSource::Draft => "",
            LoadSource::Saved => "Loaded successfully",
            LoadSource::Empty => "No diary found for this date",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenedDiary {
    pub source: LoadSource,
    pub entry: DiaryEntry,
    pub breathing: DailyBreathingRecord,
}

/// Diary view state for one date.
///
/// Loading happens once per editor; later `open` calls return the state
/// captured the first time. A pending draft wins over the saved entry and
/// a photo passed in by the caller wins over both.
pub struct DiaryEditor<'a> {
    book: DiaryBook<'a>,
    date: NaiveDate,
    photo_override: Option<String>,
    opened: OnceCell<OpenedDiary>,
}

impl<'a> DiaryEditor<'a> {
    pub fn new(store: &'a dyn KeyValueStore, date: NaiveDate) -> Self {
        Self {
            book: DiaryBook::new(store),
            date,
            photo_override: None,
            opened: OnceCell::new(),
        }
    }

    /// Photo handed over by the capture flow.
    pub fn with_photo(mut self, photo_uri: impl Into<String>) -> Self {
        self.photo_override = Some(photo_uri.into());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn open(&self) -> &OpenedDiary {
        self.opened.get_or_init(|| self.load())
    }

    /// Hand the current text over to the photo flow.
    pub fn stash_for_photo(&self, entry: &DiaryEntry) -> Result<(), CoreError> {
        self.book.stash_draft(self.date, &DiaryDraft::from(entry))
    }

    pub fn save(&self, entry: &DiaryEntry) -> Result<SaveOutcome, CoreError> {
        self.book.save(self.date, entry)
    }

    fn load(&self) -> OpenedDiary {
        let draft = self.book.take_draft(self.date).unwrap_or_else(|e| {
            tracing::warn!(date = %self.date, error = %e, "failed to clear diary draft");
            None
        });

        let (source, mut entry) = match draft {
            Some(d) => (
                LoadSource::Draft,
                DiaryEntry {
                    song: d.song,
                    artist: d.artist,
                    lucky_note: d.lucky_note,
                    photo_uri: None,
                    album_art: d.album_art,
                },
            ),
            None => match self.book.load(self.date) {
                Some(saved) => (LoadSource::Saved, saved),
                None => (LoadSource::Empty, DiaryEntry::default()),
            },
        };
        if let Some(photo) = &self.photo_override {
            entry.photo_uri = Some(photo.clone());
        }

        OpenedDiary {
            source,
            entry,
            breathing: self.book.breathing(self.date),
        }
    }
}
