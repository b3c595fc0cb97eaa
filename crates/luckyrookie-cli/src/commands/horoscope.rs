use chrono::Datelike;
use clap::Args;
use luckyrookie_core::lucky::parse_birth_date;
use luckyrookie_core::remote::{HoroscopeClient, HoroscopePeriod};
use luckyrookie_core::{Config, ZodiacSign};

use super::{runtime, CmdResult};

#[derive(Args)]
pub struct HoroscopeArgs {
    /// Zodiac sign, defaults to the sign of profile.birth_date
    #[arg(long)]
    sign: Option<String>,
    /// daily, weekly or monthly
    #[arg(long, default_value = "daily")]
    period: HoroscopePeriod,
}

pub fn run(args: HoroscopeArgs) -> CmdResult {
    let config = Config::load_or_default();
    let sign = match args.sign {
        Some(name) => name.parse::<ZodiacSign>()?,
        None => {
            let birth = config
                .profile
                .birth_date
                .as_deref()
                .ok_or("Please enter your birthday so we can detect your sign first.")?;
            let birth = parse_birth_date(birth)?;
            ZodiacSign::from_month_day(birth.month(), birth.day())?
        }
    };

    let client = HoroscopeClient::new(config.endpoints.horoscope_api);
    let text = runtime()?.block_on(client.reading(sign, args.period))?;
    println!("{sign}:");
    println!("{text}");
    Ok(())
}
