use chrono::{DateTime, Local};
use clap::Args;
use luckyrookie_core::remote::GeoClient;
use luckyrookie_core::Config;
use serde_json::json;

use super::{print_json, runtime, CmdResult};

#[derive(Args)]
pub struct SunArgs {
    /// City name, defaults to profile.city
    city: Option<String>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SunArgs) -> CmdResult {
    let config = Config::load_or_default();
    let city = args.city.unwrap_or(config.profile.city);
    let city = city.trim();
    if city.is_empty() {
        return Err("Please enter a city name.".into());
    }

    let client = GeoClient::new(config.endpoints.geocoding_api, config.endpoints.sun_api);
    let rt = runtime()?;
    let (place, sun) = rt.block_on(async {
        let places = client.search(city).await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| format!("City not found: {city}"))?;
        let sun = client.sun_times(place.latitude, place.longitude).await?;
        Ok::<_, Box<dyn std::error::Error>>((place, sun))
    })?;
    let golden = sun.golden_hour(&Local);

    if args.json {
        return print_json(&json!({
            "place": place,
            "sunrise": sun.sunrise.with_timezone(&Local).to_rfc3339(),
            "sunset": sun.sunset.with_timezone(&Local).to_rfc3339(),
            "goldenHour": {
                "morning": [golden.morning_start.to_rfc3339(), golden.morning_end.to_rfc3339()],
                "evening": [golden.evening_start.to_rfc3339(), golden.evening_end.to_rfc3339()],
            },
            "inGoldenHour": golden.contains(&Local::now()),
        }));
    }

    println!("{}", place.label());
    println!("  Sunrise  {}", hm(&sun.sunrise.with_timezone(&Local)));
    println!("  Sunset   {}", hm(&sun.sunset.with_timezone(&Local)));
    println!(
        "  Golden hour  {} - {}, {} - {}",
        hm(&golden.morning_start),
        hm(&golden.morning_end),
        hm(&golden.evening_start),
        hm(&golden.evening_end)
    );
    if golden.contains(&Local::now()) {
        println!("It's golden hour right now.");
    }
    Ok(())
}

fn hm(t: &DateTime<Local>) -> String {
    t.format("%H:%M").to_string()
}
