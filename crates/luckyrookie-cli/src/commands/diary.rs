use clap::{Args, Subcommand};
use luckyrookie_core::diary::{DiaryBook, DiaryDraft, DiaryEditor, DiaryEntry, LoadSource};
use luckyrookie_core::Database;
use serde_json::json;

use super::{date_or_today, print_json, CmdResult};

#[derive(Subcommand)]
pub enum DiaryAction {
    /// Save the entry for a date; the first save of a date earns a clover
    Save {
        #[command(flatten)]
        fields: EntryFields,
        /// Photo URI
        #[arg(long)]
        photo: Option<String>,
    },
    /// Open a date: pending draft first, then the saved entry
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Photo just taken, replaces the entry's photo
        #[arg(long)]
        photo: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stash unsaved text while a photo is being taken
    Draft {
        #[command(flatten)]
        fields: EntryFields,
    },
}

#[derive(Args)]
pub struct EntryFields {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    song: String,
    #[arg(long, default_value = "")]
    artist: String,
    /// What lucky thing happened
    #[arg(long, default_value = "")]
    note: String,
    #[arg(long)]
    album_art: Option<String>,
}

impl EntryFields {
    fn entry(&self, photo: Option<String>) -> DiaryEntry {
        DiaryEntry {
            song: self.song.clone(),
            artist: self.artist.clone(),
            lucky_note: self.note.clone(),
            photo_uri: photo,
            album_art: self.album_art.clone(),
        }
    }
}

pub fn run(action: DiaryAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        DiaryAction::Save { fields, photo } => {
            let date = date_or_today(fields.date.as_deref())?;
            let outcome = DiaryBook::new(&db).save(date, &fields.entry(photo))?;
            tracing::info!(event = ?outcome.event(date), "diary saved");
            println!("{}", outcome.message());
        }
        DiaryAction::Show { date, photo, json } => {
            let date = date_or_today(date.as_deref())?;
            let mut editor = DiaryEditor::new(&db, date);
            if let Some(photo) = photo {
                editor = editor.with_photo(photo);
            }
            let opened = editor.open();

            if json {
                return print_json(opened);
            }
            if opened.source != LoadSource::Draft {
                println!("{}", opened.source.message());
            }
            let entry = &opened.entry;
            println!("Date:    {date}");
            println!("Song:    {}", entry.song);
            println!("Artist:  {}", entry.artist);
            println!("Note:    {}", entry.lucky_note);
            if let Some(photo) = &entry.photo_uri {
                println!("Photo:   {photo}");
            }
            if let Some(art) = &entry.album_art {
                println!("Album:   {art}");
            }
            if opened.breathing.total_cycles > 0 {
                println!(
                    "Breathing: {} cycle(s), last pattern {}",
                    opened.breathing.total_cycles, opened.breathing.last_pattern_name
                );
            }
        }
        DiaryAction::Draft { fields } => {
            let date = date_or_today(fields.date.as_deref())?;
            DiaryBook::new(&db).stash_draft(date, &DiaryDraft::from(&fields.entry(None)))?;
            println!("draft stashed for {date}");
        }
    }
    Ok(())
}

pub fn clovers() -> CmdResult {
    let db = Database::open()?;
    let ledger = DiaryBook::new(&db).clovers();
    print_json(&json!({
        "clovers": ledger.balance(),
        "rewardedDates": ledger.rewarded_dates(),
    }))
}
