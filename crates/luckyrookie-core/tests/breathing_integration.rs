//! Breathing engine against a real key-value store.

use std::cell::Cell;

use chrono::{Local, NaiveDate, TimeZone};
use luckyrookie_core::breathing::record::load_daily;
use luckyrookie_core::error::StoreError;
use luckyrookie_core::{BreathingEngine, BreathingPattern, Database, Event, KeyValueStore, Phase};

/// Store whose writes always fail, counting attempts.
struct BrokenStore {
    writes: Cell<u32>,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        self.writes.set(self.writes.get() + 1);
        Err(StoreError::QueryFailed("disk full".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

fn noon(day: u32) -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
}

fn run_ticks(engine: &mut BreathingEngine, n: u32) -> Vec<Event> {
    (0..n).filter_map(|_| engine.tick()).collect()
}

#[test]
fn two_sessions_accumulate_in_one_day() {
    let db = Database::open_memory().unwrap();
    let mut engine = BreathingEngine::new();

    engine.start(BreathingPattern::parse("4,0,4,0").unwrap()).unwrap();
    run_ticks(&mut engine, 16);
    assert_eq!(engine.cycles_completed(), 2);
    let first = engine.stop_at(&db, noon(3));
    assert_eq!(first.record.unwrap().total_cycles, 2);

    engine.start(BreathingPattern::builtin("box").unwrap()).unwrap();
    run_ticks(&mut engine, 16);
    let second = engine.stop_at(&db, noon(3));
    let record = second.record.unwrap();
    assert_eq!(record.total_cycles, 3);
    assert_eq!(record.last_pattern_name, "Box Breathing");

    let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    assert_eq!(load_daily(&db, date), record);
}

#[test]
fn phase_sequence_skips_zero_phases() {
    let mut engine = BreathingEngine::new();
    engine.start(BreathingPattern::builtin("simple").unwrap()).unwrap();

    let phases: Vec<Phase> = run_ticks(&mut engine, 20)
        .into_iter()
        .filter_map(|e| match e {
            Event::PhaseChanged { to, .. } => Some(to),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![Phase::Exhale, Phase::Inhale, Phase::Exhale, Phase::Inhale]
    );
    assert_eq!(engine.cycles_completed(), 2);
}

#[test]
fn save_failure_warns_once_and_goes_idle() {
    let store = BrokenStore { writes: Cell::new(0) };
    let mut engine = BreathingEngine::new();
    engine.start(BreathingPattern::parse("1,0,1,0").unwrap()).unwrap();
    run_ticks(&mut engine, 4);

    let outcome = engine.stop_at(&store, noon(4));
    assert_eq!(store.writes.get(), 1);
    assert!(outcome.record.is_none());
    assert!(outcome.warning.unwrap().contains("disk full"));
    assert!(!engine.is_running());
    assert!(matches!(
        outcome.event,
        Event::BreathingStopped { cycles: 2, saved: false, .. }
    ));
}

#[test]
fn stop_without_cycles_writes_nothing() {
    let store = BrokenStore { writes: Cell::new(0) };
    let mut engine = BreathingEngine::new();
    engine.start(BreathingPattern::builtin("4-7-8").unwrap()).unwrap();
    run_ticks(&mut engine, 5);

    let outcome = engine.stop_at(&store, noon(5));
    assert_eq!(store.writes.get(), 0);
    assert!(outcome.warning.is_none());
}

#[test]
fn eight_ticks_of_four_zero_four_zero_is_one_cycle() {
    let mut engine = BreathingEngine::new();
    engine.start(BreathingPattern::parse("4,0,4,0").unwrap()).unwrap();
    let mut phases = vec![engine.phase()];

    for event in run_ticks(&mut engine, 8) {
        if let Event::PhaseChanged { to, .. } = event {
            phases.push(to);
        }
    }
    assert_eq!(phases, vec![Phase::Inhale, Phase::Exhale, Phase::Inhale]);
    assert_eq!(engine.cycles_completed(), 1);
}

#[test]
fn second_stop_writes_nothing() {
    let store = BrokenStore { writes: Cell::new(0) };
    let mut engine = BreathingEngine::new();
    engine.start(BreathingPattern::parse("4,0,4,0").unwrap()).unwrap();
    run_ticks(&mut engine, 16);
    assert_eq!(engine.cycles_completed(), 2);

    engine.stop_at(&store, noon(6));
    assert_eq!(store.writes.get(), 1);

    let again = engine.stop_at(&store, noon(6));
    assert_eq!(store.writes.get(), 1);
    assert!(again.warning.is_none());
    assert!(matches!(again.event, Event::BreathingStopped { cycles: 0, .. }));
}
