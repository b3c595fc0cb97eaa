use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::breathing::{Phase, SessionState};

/// Every state change in the system produces an Event.
/// Display layers render them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    BreathingStarted {
        pattern: String,
        phase: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
        duration_secs: u32,
        cycles_completed: u32,
        /// True when this transition entered `inhale` and closed a cycle.
        cycle_completed: bool,
        at: DateTime<Utc>,
    },
    BreathingStopped {
        pattern: Option<String>,
        cycles: u32,
        /// Whether the daily tally was written.
        saved: bool,
        at: DateTime<Utc>,
    },
    BreathingSnapshot {
        state: SessionState,
        phase: Phase,
        seconds_remaining: u32,
        cycles_completed: u32,
        pattern: Option<String>,
        at: DateTime<Utc>,
    },
    DiarySaved {
        date: NaiveDate,
        clover_earned: bool,
        clovers: u64,
        at: DateTime<Utc>,
    },
}
