use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Capitalized name, as the horoscope API expects it.
    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Sign for a birth month and day.
    ///
    /// Day bounds are only checked against `1..=31`, so `(2, 30)` is a
    /// Pisces rather than an error.
    ///
    /// # Errors
    /// Month outside `1..=12` or day outside `1..=31`.
    pub fn from_month_day(month: u32, day: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(ValidationError::InvalidValue {
                field: "birthday".into(),
                message: "Please enter a valid day and month.".into(),
            });
        }

        use ZodiacSign::*;
        let sign = match (month, day) {
            (3, 21..) | (4, ..=19) => Aries,
            (4, _) | (5, ..=20) => Taurus,
            (5, _) | (6, ..=20) => Gemini,
            (6, _) | (7, ..=22) => Cancer,
            (7, _) | (8, ..=22) => Leo,
            (8, _) | (9, ..=22) => Virgo,
            (9, _) | (10, ..=22) => Libra,
            (10, _) | (11, ..=21) => Scorpio,
            (11, _) | (12, ..=21) => Sagittarius,
            (12, _) | (1, ..=19) => Capricorn,
            (1, _) | (2, ..=18) => Aquarius,
            _ => Pisces,
        };
        Ok(sign)
    }
}

impl std::str::FromStr for ZodiacSign {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "sign".into(),
                message: format!("unknown zodiac sign '{wanted}'"),
            })
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
