//! Personal day number and birth date parsing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Digit-sum reduced number in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalDayNumber(u8);

impl PersonalDayNumber {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PersonalDayNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repeatedly sum decimal digits until a single digit remains; 0 becomes 9.
pub fn reduce_to_digit(mut n: u32) -> u8 {
    while n > 9 {
        let mut sum = 0;
        while n > 0 {
            sum += n % 10;
            n /= 10;
        }
        n = sum;
    }
    if n == 0 {
        9
    } else {
        n as u8
    }
}

/// birth month + birth day + today's year + month + day, digit-reduced.
pub fn personal_day_number(birth: NaiveDate, today: NaiveDate) -> PersonalDayNumber {
    let raw = birth.month() + birth.day() + today.year().unsigned_abs() + today.month() + today.day();
    PersonalDayNumber(reduce_to_digit(raw))
}

/// Parse a strict `YYYY-MM-DD` date (surrounding whitespace ignored).
///
/// # Errors
/// Anything not shaped as four, two, two digits, or not a real calendar
/// date (e.g. `2023-02-29`).
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let s = input.trim();
    let invalid = || ValidationError::InvalidDate(input.to_string());

    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(invalid());
    }

    let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = s[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = s[8..10].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
