//! Clover reward ledger.
//!
//! The balance is a decimal string under `lucky-rookie-clovers`; rewarded
//! dates are a JSON string array under `lucky-rookie-diary-dates`.

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::storage::{keys, KeyValueStore};

pub struct CloverLedger<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CloverLedger<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Current balance. Missing or unparseable values read as zero.
    pub fn balance(&self) -> u64 {
        self.store
            .get_soft(keys::CLOVERS)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Read-increment-write. Returns the new balance.
    ///
    /// # Errors
    /// Returns the store error if the write fails; the balance is unchanged.
    pub fn award(&self) -> Result<u64, StoreError> {
        let total = self.balance().saturating_add(1);
        self.store.set(keys::CLOVERS, &total.to_string())?;
        Ok(total)
    }

    pub fn rewarded_dates(&self) -> Vec<String> {
        self.store
            .get_soft(keys::DIARY_DATES)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(dates) => Some(dates),
                Err(e) => {
                    tracing::warn!(error = %e, "undecodable rewarded-dates list");
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn is_rewarded(&self, date: NaiveDate) -> bool {
        let key = keys::date_key(date);
        self.rewarded_dates().contains(&key)
    }

    /// Append `date` to the rewarded list if it is not already there.
    pub fn mark_rewarded(&self, date: NaiveDate) -> Result<(), StoreError> {
        let key = keys::date_key(date);
        let mut dates = self.rewarded_dates();
        if dates.contains(&key) {
            return Ok(());
        }
        dates.push(key);
        let json = serde_json::to_string(&dates).map_err(|e| StoreError::Corrupt {
            key: keys::DIARY_DATES.into(),
            message: e.to_string(),
        })?;
        self.store.set(keys::DIARY_DATES, &json)
    }

    /// Award one clover for `date` unless that date was already rewarded.
    /// Returns the new balance when a clover was awarded.
    ///
    /// The date is marked before the balance moves. If the balance write
    /// then fails the mark is undone.
    pub fn award_once(&self, date: NaiveDate) -> Result<Option<u64>, StoreError> {
        if self.is_rewarded(date) {
            return Ok(None);
        }
        let previous = self.store.get_soft(keys::DIARY_DATES);
        self.mark_rewarded(date)?;

        match self.award() {
            Ok(total) => {
                tracing::debug!(%date, total, "clover awarded");
                Ok(Some(total))
            }
            Err(e) => {
                let undo = match &previous {
                    Some(raw) => self.store.set(keys::DIARY_DATES, raw),
                    None => self.store.remove(keys::DIARY_DATES),
                };
                if let Err(undo_err) = undo {
                    tracing::warn!(%date, error = %undo_err, "failed to unmark rewarded date");
                }
                Err(e)
            }
        }
    }
}
