//! Lucky color chart: per-weekday colors for each area of life.

use chrono::Weekday;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedColor {
    pub name: &'static str,
    pub hex: &'static str,
}

const RED: NamedColor = NamedColor { name: "Red", hex: "#FF0000" };
const ORANGE: NamedColor = NamedColor { name: "Orange", hex: "#FF8C00" };
const PINK: NamedColor = NamedColor { name: "Pink", hex: "#FFB6C1" };
const PURPLE: NamedColor = NamedColor { name: "Purple", hex: "#9370DB" };
const GREEN: NamedColor = NamedColor { name: "Green", hex: "#90EE90" };
const BLACK: NamedColor = NamedColor { name: "Black", hex: "#000000" };
const GRAY: NamedColor = NamedColor { name: "Gray", hex: "#808080" };
const WHITE: NamedColor = NamedColor { name: "White", hex: "#FFFFFF" };
const YELLOW: NamedColor = NamedColor { name: "Yellow", hex: "#FFFF00" };
const LIGHT_BLUE: NamedColor = NamedColor { name: "Light Blue", hex: "#87CEEB" };
const BLUE: NamedColor = NamedColor { name: "Blue", hex: "#0000FF" };
const LIGHT_YELLOW: NamedColor = NamedColor { name: "Light Yellow", hex: "#F0E68C" };
const BROWN: NamedColor = NamedColor { name: "Brown", hex: "#8B4513" };
const BEIGE: NamedColor = NamedColor { name: "Beige", hex: "#F5DEB3" };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayColors {
    pub work: &'static [NamedColor],
    pub finance: &'static [NamedColor],
    pub love: &'static [NamedColor],
    pub health: &'static [NamedColor],
    /// Colors to avoid.
    pub unlucky: &'static [NamedColor],
}

pub fn colors_for(weekday: Weekday) -> DayColors {
    match weekday {
        Weekday::Sun => DayColors {
            work: &[RED, ORANGE, PINK],
            finance: &[PURPLE, ORANGE, GREEN],
            love: &[BLACK, GRAY, GREEN],
            health: &[WHITE, YELLOW],
            unlucky: &[LIGHT_BLUE, BLUE],
        },
        Weekday::Mon => DayColors {
            work: &[YELLOW, LIGHT_BLUE, GREEN],
            finance: &[PURPLE, LIGHT_BLUE, BLUE],
            love: &[PINK, PURPLE, BLUE],
            health: &[PURPLE, PINK, LIGHT_BLUE],
            unlucky: &[RED, ORANGE],
        },
        Weekday::Tue => DayColors {
            work: &[PURPLE, BLACK, ORANGE],
            finance: &[YELLOW, ORANGE, LIGHT_YELLOW],
            love: &[RED, ORANGE],
            health: &[LIGHT_BLUE, PINK],
            unlucky: &[WHITE],
        },
        Weekday::Wed => DayColors {
            work: &[YELLOW, ORANGE, GREEN],
            finance: &[BLACK, GRAY, BROWN],
            love: &[BLACK, BEIGE],
            health: &[PURPLE, BLUE],
            unlucky: &[RED, PINK],
        },
        Weekday::Thu => DayColors {
            work: &[BLUE, RED, GREEN],
            finance: &[ORANGE, BEIGE, PINK],
            love: &[LIGHT_BLUE, ORANGE, RED],
            health: &[BLUE, GRAY],
            unlucky: &[PURPLE],
        },
        Weekday::Fri => DayColors {
            work: &[LIGHT_BLUE, YELLOW, BEIGE],
            finance: &[YELLOW, PINK],
            love: &[YELLOW, PINK, PURPLE],
            health: &[RED],
            unlucky: &[GRAY],
        },
        Weekday::Sat => DayColors {
            work: &[BLUE, GRAY, BLACK],
            finance: &[LIGHT_BLUE, BLUE, PURPLE],
            love: &[LIGHT_BLUE, PINK, RED],
            health: &[BEIGE, ORANGE],
            unlucky: &[WHITE, YELLOW],
        },
    }
}

/// Accepts `0`-`6` (Sunday first), three-letter and full English names.
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    match input.trim().to_lowercase().as_str() {
        "0" | "sun" | "sunday" => Some(Weekday::Sun),
        "1" | "mon" | "monday" => Some(Weekday::Mon),
        "2" | "tue" | "tuesday" => Some(Weekday::Tue),
        "3" | "wed" | "wednesday" => Some(Weekday::Wed),
        "4" | "thu" | "thursday" => Some(Weekday::Thu),
        "5" | "fri" | "friday" => Some(Weekday::Fri),
        "6" | "sat" | "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}
