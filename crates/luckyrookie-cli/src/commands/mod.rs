pub mod auth;
pub mod breathe;
pub mod color;
pub mod config;
pub mod cookie;
pub mod diary;
pub mod horoscope;
pub mod lucky;
pub mod music;
pub mod sun;
pub mod zodiac;

use std::future::Future;

use chrono::{Local, NaiveDate};
use luckyrookie_core::Config;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Single-threaded runtime for the async commands.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Resolves on Ctrl-C. If the handler cannot be installed this never
/// resolves, so loops run to their own limit instead of stopping at once.
pub async fn ctrl_c() {
    until_signal(tokio::signal::ctrl_c()).await;
}

async fn until_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Date argument or today's local date.
pub fn date_or_today(arg: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD").into()),
        None => Ok(Local::now().date_naive()),
    }
}

/// Birth date argument, falling back to `profile.birth_date`.
pub fn birth_input(arg: Option<String>, config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    arg.or_else(|| config.profile.birth_date.clone())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            "no birth date given; pass one or run `luckyrookie config set profile.birth_date YYYY-MM-DD`"
                .into()
        })
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
