//! Lucky-time calculator: numerology day number, lucky hours, countdown,
//! birth-weekday windows, and golden hour.

mod calculator;
pub mod day_ranges;
mod golden_hour;
pub mod hours;
pub mod numerology;

pub use calculator::{LuckyTimeCalculator, Reveal};
pub use day_ranges::{DayTimeRanges, TimeRange, TimeStatus};
pub use golden_hour::GoldenHour;
pub use hours::{
    build_lucky_times, countdown_until, format_countdown, lucky_hours, lucky_hours_for,
    next_lucky_moment, LuckyTimeSlot, SlotDay, DEFAULT_LUCKY_HOURS,
};
pub use numerology::{parse_birth_date, personal_day_number, PersonalDayNumber};
