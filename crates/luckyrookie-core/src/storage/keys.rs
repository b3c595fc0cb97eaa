//! Key names for every persisted value.

use chrono::NaiveDate;

pub const CLOVERS: &str = "lucky-rookie-clovers";
pub const DIARY_DATES: &str = "lucky-rookie-diary-dates";
pub const SPOTIFY_TOKEN: &str = "spotify-app-token";
pub const SPOTIFY_TOKEN_EXPIRY: &str = "spotify-app-token-expiry";

const BREATHING_PREFIX: &str = "breathing-cycles-";
const DIARY_PREFIX: &str = "lucky-diary-";
const DRAFT_PREFIX: &str = "temp-diary-";

/// `YYYY-MM-DD`, the date format used in every per-day key.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn breathing(date: NaiveDate) -> String {
    format!("{BREATHING_PREFIX}{}", date_key(date))
}

pub fn diary(date: NaiveDate) -> String {
    format!("{DIARY_PREFIX}{}", date_key(date))
}

pub fn diary_draft(date: NaiveDate) -> String {
    format!("{DRAFT_PREFIX}{}", date_key(date))
}
