//! Per-day breathing tally.
//!
//! Stored as `{"cycles": n, "pattern": "...", "lastSession": "..."|null}`
//! under `breathing-cycles-<YYYY-MM-DD>`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::{keys, KeyValueStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBreathingRecord {
    #[serde(rename = "cycles")]
    pub total_cycles: u32,
    #[serde(rename = "pattern")]
    pub last_pattern_name: String,
    #[serde(rename = "lastSession")]
    pub last_session: Option<DateTime<Utc>>,
}

/// Read the tally for `date`. Missing, unreadable, and undecodable records
/// all read as an empty tally.
pub fn load_daily(store: &dyn KeyValueStore, date: NaiveDate) -> DailyBreathingRecord {
    let key = keys::breathing(date);
    let Some(raw) = store.get_soft(&key) else {
        return DailyBreathingRecord::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(%key, error = %e, "undecodable breathing record, treating as empty");
        DailyBreathingRecord::default()
    })
}

/// Cycles recorded for `date`, zero when nothing readable is stored.
pub fn today_total(store: &dyn KeyValueStore, date: NaiveDate) -> u32 {
    load_daily(store, date).total_cycles
}

/// Read-modify-write: add `cycles` to the day's tally and overwrite the
/// pattern name and session timestamp.
///
/// # Errors
/// Returns the store error when the write fails. Nothing is retried.
pub fn add_cycles(
    store: &dyn KeyValueStore,
    date: NaiveDate,
    cycles: u32,
    pattern_name: &str,
    at: DateTime<Utc>,
) -> Result<DailyBreathingRecord, StoreError> {
    let existing = load_daily(store, date);
    let updated = DailyBreathingRecord {
        total_cycles: existing.total_cycles.saturating_add(cycles),
        last_pattern_name: pattern_name.to_string(),
        last_session: Some(at),
    };
    let json = serde_json::to_string(&updated).map_err(|e| StoreError::Corrupt {
        key: keys::breathing(date),
        message: e.to_string(),
    })?;
    store.set(&keys::breathing(date), &json)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use chrono::TimeZone;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn missing_record_reads_as_empty() {
        let db = Database::open_memory().unwrap();
        assert_eq!(load_daily(&db, day()), DailyBreathingRecord::default());
        assert_eq!(today_total(&db, day()), 0);
    }

    #[test]
    fn add_cycles_accumulates_and_overwrites_pattern() {
        let db = Database::open_memory().unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();

        add_cycles(&db, day(), 3, "Box Breathing", t1).unwrap();
        let rec = add_cycles(&db, day(), 2, "Simple Breathing", t2).unwrap();

        assert_eq!(rec.total_cycles, 5);
        assert_eq!(rec.last_pattern_name, "Simple Breathing");
        assert_eq!(rec.last_session, Some(t2));
        assert_eq!(load_daily(&db, day()), rec);
    }

    #[test]
    fn reads_app_written_json() {
        let db = Database::open_memory().unwrap();
        db.kv_set(
            "breathing-cycles-2024-05-01",
            r#"{"cycles":7,"pattern":"4-7-8 Relaxing","lastSession":"2024-05-01T09:30:00.000Z"}"#,
        )
        .unwrap();
        let rec = load_daily(&db, day());
        assert_eq!(rec.total_cycles, 7);
        assert_eq!(
            rec.last_session,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn corrupt_record_reads_as_empty() {
        let db = Database::open_memory().unwrap();
        db.kv_set("breathing-cycles-2024-05-01", "not json").unwrap();
        assert_eq!(load_daily(&db, day()).total_cycles, 0);
    }

    #[test]
    fn serialized_field_names_match_app() {
        let rec = DailyBreathingRecord {
            total_cycles: 1,
            last_pattern_name: "Box Breathing".into(),
            last_session: None,
        };
        let json: serde_json::Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["cycles"], 1);
        assert_eq!(json["pattern"], "Box Breathing");
        assert!(json["lastSession"].is_null());
    }
}
