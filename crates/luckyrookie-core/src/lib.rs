//! # LuckyRookie Core Library
//!
//! Business logic for the LuckyRookie wellness companion. Everything the
//! app does is reachable from the `luckyrookie` CLI binary, which is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Breathing**: a tick-driven phase state machine; the caller (or
//!   [`breathing::run_session`]) invokes `tick()` once per second
//! - **Lucky time**: numerology day number, lucky hours with a countdown,
//!   birth-weekday windows, golden hour
//! - **Lookup tables**: weekday colors and zodiac signs
//! - **Diary**: per-date entries and a once-per-date clover reward
//! - **Storage**: SQLite key-value store and TOML configuration
//! - **Remote**: async HTTP clients for quotes, horoscopes, geocoding,
//!   sunrise/sunset and music search
//!
//! ## Key Components
//!
//! - [`BreathingEngine`]: breathing phase state machine
//! - [`LuckyTimeCalculator`]: birth date to lucky schedule
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod breathing;
pub mod colors;
pub mod diary;
pub mod error;
pub mod events;
pub mod lucky;
pub mod remote;
pub mod storage;
pub mod zodiac;

pub use breathing::{BreathingEngine, BreathingPattern, DailyBreathingRecord, Phase, SessionState};
pub use diary::{CloverLedger, DiaryBook, DiaryEditor, DiaryEntry};
pub use error::{ConfigError, CoreError, RemoteError, Result, StoreError, ValidationError};
pub use events::Event;
pub use lucky::{LuckyTimeCalculator, PersonalDayNumber};
pub use storage::{Config, Database, KeyValueStore};
pub use zodiac::ZodiacSign;
