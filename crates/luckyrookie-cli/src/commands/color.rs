use chrono::{Datelike, Local, Weekday};
use clap::Args;
use luckyrookie_core::colors::{self, NamedColor};

use super::{print_json, CmdResult};

#[derive(Args)]
pub struct ColorArgs {
    /// Weekday name or 0-6 (Sunday first), defaults to today
    weekday: Option<String>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ColorArgs) -> CmdResult {
    let weekday = match args.weekday.as_deref() {
        Some(raw) => colors::parse_weekday(raw).ok_or_else(|| format!("unknown weekday '{raw}'"))?,
        None => Local::now().weekday(),
    };
    let chart = colors::colors_for(weekday);

    if args.json {
        return print_json(&chart);
    }

    println!("Lucky colors for {}", weekday_name(weekday));
    print_row("Work", chart.work);
    print_row("Finance", chart.finance);
    print_row("Love", chart.love);
    print_row("Health", chart.health);
    print_row("Avoid", chart.unlucky);
    Ok(())
}

fn print_row(label: &str, colors: &[NamedColor]) {
    let names = colors
        .iter()
        .map(|c| format!("{} ({})", c.name, c.hex))
        .collect::<Vec<_>>()
        .join(", ");
    println!("  {label:<8} {names}");
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
