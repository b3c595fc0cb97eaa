use clap::Subcommand;
use luckyrookie_core::breathing::{self, BUILTIN_KEYS};
use luckyrookie_core::breathing::record::{load_daily, today_total};
use luckyrookie_core::{BreathingEngine, BreathingPattern, Config, Database, Event};

use super::{ctrl_c, date_or_today, print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum BreatheAction {
    /// Run a session; Ctrl-C stops and saves completed cycles
    Run {
        /// Built-in key (4-7-8, box, simple) or "inhale,hold,exhale,rest"
        pattern: Option<String>,
        /// Stop after this many completed cycles
        #[arg(long)]
        cycles: Option<u32>,
        /// Print only the final summary
        #[arg(long)]
        quiet: bool,
    },
    /// Cycles recorded for a date
    Today {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// List built-in patterns
    Patterns,
}

pub fn run(action: BreatheAction) -> CmdResult {
    match action {
        BreatheAction::Run {
            pattern,
            cycles,
            quiet,
        } => {
            let spec = pattern.unwrap_or_else(|| Config::load_or_default().breathing.default_pattern);
            let pattern = BreathingPattern::parse(&spec)?;
            let db = Database::open()?;
            let mut engine = BreathingEngine::new();

            let rt = runtime()?;
            let outcome = rt.block_on(breathing::run_session(
                &mut engine,
                pattern,
                &db,
                cycles,
                ctrl_c(),
                |event| {
                    if !quiet {
                        print_event(event);
                    }
                },
            ))?;

            if let Some(warning) = &outcome.warning {
                eprintln!("warning: {warning}");
            }
            if let Event::BreathingStopped { cycles, .. } = &outcome.event {
                let today = today_total(&db, chrono::Local::now().date_naive());
                println!("session complete: {cycles} cycle(s), {today} today");
            }
        }
        BreatheAction::Today { date } => {
            let date = date_or_today(date.as_deref())?;
            let db = Database::open()?;
            print_json(&load_daily(&db, date))?;
        }
        BreatheAction::Patterns => {
            for key in BUILTIN_KEYS {
                if let Some(p) = BreathingPattern::builtin(key) {
                    println!(
                        "{key:<8} {:<18} {}-{}-{}-{} ({}s per cycle)",
                        p.name,
                        p.inhale,
                        p.hold,
                        p.exhale,
                        p.rest,
                        p.cycle_secs()
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "failed to encode event"),
    }
}
