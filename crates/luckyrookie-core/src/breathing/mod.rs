mod driver;
mod engine;
mod pattern;
pub mod record;

pub use driver::run_session;
pub use engine::{BreathingEngine, SessionState, StopOutcome};
pub use pattern::{BreathingPattern, Phase, BUILTIN_KEYS};
pub use record::DailyBreathingRecord;
