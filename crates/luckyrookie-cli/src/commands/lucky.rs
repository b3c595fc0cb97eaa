use std::time::Duration;

use chrono::Local;
use clap::Subcommand;
use luckyrookie_core::lucky::{self, LuckyTimeCalculator, TimeStatus};
use luckyrookie_core::Config;
use serde_json::json;

use super::{birth_input, ctrl_c, print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum LuckyAction {
    /// Personal day number for today
    Number {
        /// Birth date (YYYY-MM-DD), defaults to profile.birth_date
        birth: Option<String>,
    },
    /// Lucky hours, next lucky moment and birth-weekday windows
    Reveal {
        /// Birth date (YYYY-MM-DD), defaults to profile.birth_date
        birth: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Live countdown to the next lucky moment
    Watch {
        /// Birth date (YYYY-MM-DD), defaults to profile.birth_date
        birth: Option<String>,
        /// Stop after this many updates
        #[arg(long)]
        ticks: Option<u64>,
    },
}

pub fn run(action: LuckyAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut calc = LuckyTimeCalculator::<Local>::new();

    match action {
        LuckyAction::Number { birth } => {
            let birth = birth_input(birth, &config)?;
            let reveal = calc.reveal(&birth, &Local::now())?;
            println!("{}", reveal.personal_day);
        }
        LuckyAction::Reveal { birth, json } => {
            let birth = birth_input(birth, &config)?;
            let now = Local::now();
            calc.reveal(&birth, &now)?;
            let Some(reveal) = calc.current() else {
                return Ok(());
            };
            let next = calc.next_lucky(&now);
            let countdown = calc.countdown(&now);
            let status = calc.time_status(&now).unwrap_or(TimeStatus::Neutral);

            if json {
                let slots: Vec<_> = reveal
                    .slots
                    .iter()
                    .map(|s| json!({ "label": s.label, "day": s.day, "at": s.when.to_rfc3339() }))
                    .collect();
                print_json(&json!({
                    "birth": reveal.birth,
                    "personalDay": reveal.personal_day,
                    "hours": reveal.hours,
                    "slots": slots,
                    "next": next.map(|s| s.label.clone()),
                    "countdown": countdown,
                    "ranges": reveal.ranges,
                    "status": status,
                }))?;
                return Ok(());
            }

            println!("Personal day number: {}", reveal.personal_day);
            println!("Lucky times:");
            for slot in &reveal.slots {
                println!("  {}", slot.label);
            }
            if let (Some(next), Some(countdown)) = (next, countdown) {
                println!("Next lucky moment: {} (in {countdown})", next.label);
            }
            println!("Lucky windows:");
            print_ranges("lucky", reveal.ranges.lucky);
            print_ranges("love", reveal.ranges.love);
            print_ranges("unlucky", reveal.ranges.unlucky);
            println!("{}", status.message());
        }
        LuckyAction::Watch { birth, ticks } => {
            let birth = birth_input(birth, &config)?;
            calc.reveal(&birth, &Local::now())?;
            runtime()?.block_on(watch(&mut calc, &birth, ticks))?;
        }
    }
    Ok(())
}

fn print_ranges(label: &str, ranges: &[lucky::TimeRange]) {
    let joined = ranges.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(", ");
    println!("  {label:<8} {joined}");
}

/// Print the countdown once a second until Ctrl-C or the tick limit.
/// Slots are rebuilt when the calendar date changes.
async fn watch(calc: &mut LuckyTimeCalculator<Local>, birth: &str, ticks: Option<u64>) -> CmdResult {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut day = Local::now().date_naive();
    let mut shown = 0u64;

    let shutdown = ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                let now = Local::now();
                if now.date_naive() != day || calc.next_lucky(&now).is_none() {
                    day = now.date_naive();
                    calc.reveal(birth, &now)?;
                }
                let next = calc.next_lucky(&now).map(|s| s.label.clone()).unwrap_or_default();
                let countdown = calc.countdown(&now).unwrap_or_else(|| "00:00:00".into());
                let status = calc.time_status(&now).unwrap_or(TimeStatus::Neutral);
                println!("{} {countdown} until {next} | {}", now.time().format("%H:%M:%S"), status.message());

                shown += 1;
                if ticks.is_some_and(|limit| shown >= limit) {
                    break;
                }
            }
        }
    }
    tracing::debug!(updates = shown, "lucky watch ended");
    Ok(())
}
