use chrono::{DateTime, Duration, TimeZone};

/// The hour after sunrise and the hour before sunset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenHour<Tz: TimeZone> {
    pub morning_start: DateTime<Tz>,
    pub morning_end: DateTime<Tz>,
    pub evening_start: DateTime<Tz>,
    pub evening_end: DateTime<Tz>,
}

impl<Tz: TimeZone> GoldenHour<Tz> {
    pub fn from_sun_times(sunrise: DateTime<Tz>, sunset: DateTime<Tz>) -> Self {
        Self {
            morning_end: sunrise.clone() + Duration::minutes(60),
            morning_start: sunrise,
            evening_start: sunset.clone() - Duration::minutes(60),
            evening_end: sunset,
        }
    }

    pub fn contains(&self, at: &DateTime<Tz>) -> bool {
        (self.morning_start <= *at && *at <= self.morning_end)
            || (self.evening_start <= *at && *at <= self.evening_end)
    }
}
