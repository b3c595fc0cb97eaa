//! One-second tick loop around [`BreathingEngine`].
//!
//! Ticks are strictly serialized on the calling task. Once `shutdown`
//! resolves (or the cycle limit is hit) the engine is stopped and no later
//! tick can touch it.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::engine::{BreathingEngine, StopOutcome};
use super::pattern::BreathingPattern;
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::KeyValueStore;

/// Run a session until `shutdown` resolves or `max_cycles` cycles complete.
///
/// `on_event` receives the start event, then once per tick either the
/// `PhaseChanged` event or a snapshot.
///
/// # Errors
/// Fails only when the engine refuses to start.
pub async fn run_session<F>(
    engine: &mut BreathingEngine,
    pattern: BreathingPattern,
    store: &dyn KeyValueStore,
    max_cycles: Option<u32>,
    shutdown: F,
    mut on_event: impl FnMut(&Event),
) -> Result<StopOutcome, ValidationError>
where
    F: Future<Output = ()>,
{
    let started = engine.start(pattern)?;
    on_event(&started);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick of an interval completes immediately.
    ticker.tick().await;

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                match engine.tick() {
                    Some(event) => on_event(&event),
                    None => on_event(&engine.snapshot()),
                }
                if max_cycles.is_some_and(|limit| engine.cycles_completed() >= limit) {
                    break;
                }
            }
        }
    }

    Ok(engine.stop(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breathing::record::load_daily;
    use crate::storage::Database;
    use chrono::Local;

    #[tokio::test(start_paused = true)]
    async fn stops_after_cycle_limit_and_saves() {
        let db = Database::open_memory().unwrap();
        let mut engine = BreathingEngine::new();
        let mut transitions = 0;

        let outcome = run_session(
            &mut engine,
            BreathingPattern::new("t", 2, 0, 1, 0),
            &db,
            Some(2),
            std::future::pending(),
            |e| {
                if matches!(e, Event::PhaseChanged { .. }) {
                    transitions += 1;
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(transitions, 4);
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.record.unwrap().total_cycles, 2);
        assert!(!engine.is_running());
        assert_eq!(load_daily(&db, Local::now().date_naive()).total_cycles, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_first_cycle_writes_nothing() {
        let db = Database::open_memory().unwrap();
        let mut engine = BreathingEngine::new();

        let outcome = run_session(
            &mut engine,
            BreathingPattern::builtin("box").unwrap(),
            &db,
            None,
            tokio::time::sleep(Duration::from_millis(2500)),
            |_| {},
        )
        .await
        .unwrap();

        assert!(outcome.record.is_none());
        assert!(db.kv_keys_with_prefix("breathing-cycles-").unwrap().is_empty());
    }

    #[tokio::test]
    async fn refuses_empty_pattern() {
        let db = Database::open_memory().unwrap();
        let mut engine = BreathingEngine::new();
        let result = run_session(
            &mut engine,
            BreathingPattern::new("zero", 0, 0, 0, 0),
            &db,
            None,
            std::future::pending(),
            |_| {},
        )
        .await;
        assert!(result.is_err());
    }
}
