//! City geocoding and sunrise/sunset lookup.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{decode, endpoint, http_client};
use crate::error::RemoteError;
use crate::lucky::GoldenHour;

const GEOCODING: &str = "Geocoding API";
const SUN: &str = "Sunrise/sunset API";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// "Name, Region, Country" with missing parts left out.
    pub fn label(&self) -> String {
        [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SunTimes {
    pub fn golden_hour<Tz: TimeZone>(&self, tz: &Tz) -> GoldenHour<Tz> {
        GoldenHour::from_sun_times(self.sunrise.with_timezone(tz), self.sunset.with_timezone(tz))
    }
}

#[derive(Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<Place>>,
}

#[derive(Deserialize)]
struct SunResponse {
    results: Option<SunTimes>,
    status: String,
}

pub struct GeoClient {
    geocoding_url: String,
    sun_url: String,
    http: Client,
}

impl GeoClient {
    pub fn new(geocoding_url: impl Into<String>, sun_url: impl Into<String>) -> Self {
        Self {
            geocoding_url: geocoding_url.into(),
            sun_url: sun_url.into(),
            http: http_client(),
        }
    }

    /// Up to five candidate places for `name`. No match is an empty list.
    pub async fn search(&self, name: &str) -> Result<Vec<Place>, RemoteError> {
        let url = endpoint(GEOCODING, &self.geocoding_url, "v1/search")?;
        let resp = self
            .http
            .get(url)
            .query(&[
                ("name", name),
                ("count", "5"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(RemoteError::request(GEOCODING))?;

        let body: GeocodingResponse = decode(GEOCODING, resp).await?;
        Ok(body.results.unwrap_or_default())
    }

    /// Today's sunrise and sunset at the given coordinates.
    pub async fn sun_times(&self, latitude: f64, longitude: f64) -> Result<SunTimes, RemoteError> {
        let url = endpoint(SUN, &self.sun_url, "json")?;
        let resp = self
            .http
            .get(url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("formatted", "0".to_string()),
            ])
            .send()
            .await
            .map_err(RemoteError::request(SUN))?;

        let body: SunResponse = decode(SUN, resp).await?;
        match body.results {
            Some(times) if body.status == "OK" => Ok(times),
            _ => Err(RemoteError::Empty {
                service: SUN,
                message: format!("status {}", body.status),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_label_skips_missing_parts() {
        let place = Place {
            name: "Seoul".into(),
            country: Some("South Korea".into()),
            admin1: None,
            latitude: 37.566,
            longitude: 126.9784,
        };
        assert_eq!(place.label(), "Seoul, South Korea");
    }

    #[test]
    fn sun_response_parses_unformatted_times() {
        let body = r#"{"results":{"sunrise":"2024-06-01T20:11:02+00:00","sunset":"2024-06-02T10:48:10+00:00","day_length":52388},"status":"OK"}"#;
        let parsed: SunResponse = serde_json::from_str(body).unwrap();
        let times = parsed.results.unwrap();
        assert_eq!(times.sunrise.to_rfc3339(), "2024-06-01T20:11:02+00:00");
        assert_eq!(parsed.status, "OK");
    }
}
