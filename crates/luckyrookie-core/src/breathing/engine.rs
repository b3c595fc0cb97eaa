//! Breathing engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads - the caller invokes `tick()` once per second while running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//!         (inhale -> hold -> exhale -> rest -> inhale ...)
//! ```
//!
//! Zero-duration phases are never entered. A phase of `d` seconds lasts
//! exactly `d` ticks; entering `inhale` closes one cycle.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = BreathingEngine::new();
//! engine.start(BreathingPattern::builtin("box").unwrap())?;
//! // Once per second:
//! engine.tick(); // Returns Some(Event::PhaseChanged) on a transition
//! let outcome = engine.stop(&db);
//! ```

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::pattern::{BreathingPattern, Phase};
use super::record::{self, DailyBreathingRecord};
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
}

/// Result of [`BreathingEngine::stop`].
#[derive(Debug, Clone)]
pub struct StopOutcome {
    pub event: Event,
    /// The updated daily tally, when a write happened and succeeded.
    pub record: Option<DailyBreathingRecord>,
    /// Non-fatal persistence failure. The session is already idle.
    pub warning: Option<String>,
}

/// Core breathing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingEngine {
    pattern: Option<BreathingPattern>,
    state: SessionState,
    phase: Phase,
    seconds_remaining: u32,
    cycles_completed: u32,
}

impl Default for BreathingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingEngine {
    /// Create an idle engine showing `inhale`.
    pub fn new() -> Self {
        Self {
            pattern: None,
            state: SessionState::Idle,
            phase: Phase::Inhale,
            seconds_remaining: 0,
            cycles_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn pattern(&self) -> Option<&BreathingPattern> {
        self.pattern.as_ref()
    }

    /// Duration of the current phase under the active pattern.
    pub fn phase_duration(&self) -> u32 {
        self.pattern
            .as_ref()
            .map(|p| p.duration(self.phase))
            .unwrap_or(0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::BreathingSnapshot {
            state: self.state,
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            cycles_completed: self.cycles_completed,
            pattern: self.pattern.as_ref().map(|p| p.name.clone()),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session at `inhale` with zero cycles.
    ///
    /// When inhale is zero-length the engine lands on the next non-zero
    /// phase before returning, without counting a cycle.
    ///
    /// # Errors
    /// Rejects all-zero patterns and starting while already running; the
    /// engine is left untouched in both cases.
    pub fn start(&mut self, pattern: BreathingPattern) -> Result<Event, ValidationError> {
        if self.is_running() {
            return Err(ValidationError::InvalidState(
                "a breathing session is already running".into(),
            ));
        }
        pattern.validate()?;

        let phase = if pattern.inhale > 0 {
            Phase::Inhale
        } else {
            pattern
                .next_active_phase(Phase::Inhale)
                .ok_or_else(|| ValidationError::EmptyPattern(pattern.name.clone()))?
        };

        self.state = SessionState::Running;
        self.cycles_completed = 0;
        self.phase = phase;
        self.seconds_remaining = pattern.duration(phase);

        let event = Event::BreathingStarted {
            pattern: pattern.name.clone(),
            phase,
            duration_secs: self.seconds_remaining,
            at: Utc::now(),
        };
        tracing::debug!(pattern = %pattern.name, %phase, "breathing session started");
        self.pattern = Some(pattern);
        Ok(event)
    }

    /// Advance one second. Returns `Some(Event::PhaseChanged)` when the
    /// current phase ran out and a new one was entered. No-op while idle.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        if self.seconds_remaining > 1 {
            self.seconds_remaining -= 1;
            return None;
        }
        self.transition()
    }

    /// End the session and persist the cycle count for today's local date.
    pub fn stop(&mut self, store: &dyn KeyValueStore) -> StopOutcome {
        self.stop_at(store, Local::now())
    }

    /// End the session, recording completed cycles under `now`'s date.
    ///
    /// At most one write is attempted; with zero cycles none is. A failed
    /// write becomes `StopOutcome::warning` and the engine still goes idle.
    pub fn stop_at(&mut self, store: &dyn KeyValueStore, now: DateTime<Local>) -> StopOutcome {
        let cycles = self.cycles_completed;
        let pattern_name = self.pattern.as_ref().map(|p| p.name.clone());

        let mut record = None;
        let mut warning = None;
        if cycles > 0 {
            let name = pattern_name.as_deref().unwrap_or_default();
            match record::add_cycles(
                store,
                now.date_naive(),
                cycles,
                name,
                now.with_timezone(&Utc),
            ) {
                Ok(updated) => record = Some(updated),
                Err(e) => {
                    tracing::warn!(cycles, error = %e, "failed to save breathing cycles");
                    warning = Some(format!("Failed to save breathing cycles: {e}"));
                }
            }
        }

        self.reset();

        StopOutcome {
            event: Event::BreathingStopped {
                pattern: pattern_name,
                cycles,
                saved: record.is_some(),
                at: now.with_timezone(&Utc),
            },
            record,
            warning,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.phase = Phase::Inhale;
        self.seconds_remaining = 0;
        self.cycles_completed = 0;
    }

    fn transition(&mut self) -> Option<Event> {
        let pattern = self.pattern.as_ref()?;
        let from = self.phase;
        let to = pattern.next_active_phase(from)?;
        let duration = pattern.duration(to);

        let cycle_completed = to == Phase::Inhale;
        if cycle_completed {
            self.cycles_completed += 1;
        }
        self.phase = to;
        self.seconds_remaining = duration;

        tracing::debug!(%from, %to, cycles = self.cycles_completed, "phase transition");
        Some(Event::PhaseChanged {
            from,
            to,
            duration_secs: duration,
            cycles_completed: self.cycles_completed,
            cycle_completed,
            at: Utc::now(),
        })
    }
}
