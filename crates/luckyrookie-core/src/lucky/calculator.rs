//! Stateful lucky-time calculator.
//!
//! Keeps the last successful reveal. A failed reveal (bad birth date) leaves
//! the previous personal day and lucky list in place so the display keeps
//! showing valid values.

use chrono::{DateTime, NaiveDate, TimeZone};

use super::day_ranges::{self, DayTimeRanges, TimeStatus};
use super::hours::{self, LuckyTimeSlot};
use super::numerology::{self, PersonalDayNumber};
use crate::error::ValidationError;

/// Everything derived from one birth date at reveal time.
#[derive(Debug, Clone)]
pub struct Reveal<Tz: TimeZone> {
    pub birth: NaiveDate,
    pub personal_day: PersonalDayNumber,
    pub hours: [u32; 3],
    pub slots: Vec<LuckyTimeSlot<Tz>>,
    pub ranges: DayTimeRanges,
}

#[derive(Debug, Clone)]
pub struct LuckyTimeCalculator<Tz: TimeZone> {
    current: Option<Reveal<Tz>>,
}

impl<Tz: TimeZone> Default for LuckyTimeCalculator<Tz> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> LuckyTimeCalculator<Tz> {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<&Reveal<Tz>> {
        self.current.as_ref()
    }

    /// Parse `birth_input` and recompute everything for `now`'s date.
    ///
    /// # Errors
    /// Returns the validation error for an unparseable date; the previous
    /// reveal is kept.
    pub fn reveal(
        &mut self,
        birth_input: &str,
        now: &DateTime<Tz>,
    ) -> Result<&Reveal<Tz>, ValidationError> {
        let birth = numerology::parse_birth_date(birth_input)?;
        let today = now.date_naive();
        let personal_day = numerology::personal_day_number(birth, today);
        let hours = hours::lucky_hours(personal_day);
        let slots = hours::build_lucky_times(today, &hours, now);

        tracing::debug!(%birth, %personal_day, ?hours, "lucky times revealed");
        Ok(self.current.insert(Reveal {
            birth,
            personal_day,
            hours,
            slots,
            ranges: day_ranges::ranges_for_birth(birth),
        }))
    }

    /// Personal day number for `now`'s date, recomputed on each call so it
    /// follows the clock past midnight.
    pub fn personal_day_at(&self, now: &DateTime<Tz>) -> Option<PersonalDayNumber> {
        let reveal = self.current.as_ref()?;
        Some(numerology::personal_day_number(reveal.birth, now.date_naive()))
    }

    pub fn next_lucky(&self, now: &DateTime<Tz>) -> Option<&LuckyTimeSlot<Tz>> {
        hours::next_lucky_moment(&self.current.as_ref()?.slots, now)
    }

    pub fn countdown(&self, now: &DateTime<Tz>) -> Option<String> {
        let next = self.next_lucky(now)?;
        Some(hours::countdown_until(&next.when, now))
    }

    pub fn time_status(&self, now: &DateTime<Tz>) -> Option<TimeStatus> {
        let reveal = self.current.as_ref()?;
        Some(day_ranges::time_status(&reveal.ranges, now.time()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lucky::hours::SlotDay;
    use chrono::Utc;

    fn now(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, 0, 0).unwrap()
    }

    #[test]
    fn reveal_derives_day_number_and_slots() {
        let mut calc = LuckyTimeCalculator::new();
        let reveal = calc.reveal("2002-12-07", &now(12)).unwrap();
        // 12 + 7 + 2024 + 3 + 15 = 2061 -> 9
        assert_eq!(reveal.personal_day.get(), 9);
        assert_eq!(reveal.hours, [11, 16, 22]);
        assert_eq!(reveal.slots.len(), 3);
        assert_eq!(reveal.slots[0].label, "Today 16:11");
        assert_eq!(reveal.slots[2].day, SlotDay::Next);
    }

    #[test]
    fn failed_reveal_keeps_previous_values() {
        let mut calc = LuckyTimeCalculator::new();
        calc.reveal("2002-12-07", &now(12)).unwrap();

        let err = calc.reveal("2002-12-7", &now(13)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate(_)));

        let kept = calc.current().unwrap();
        assert_eq!(kept.personal_day.get(), 9);
        assert_eq!(kept.birth, NaiveDate::from_ymd_opt(2002, 12, 7).unwrap());
    }

    #[test]
    fn failed_first_reveal_leaves_nothing() {
        let mut calc: LuckyTimeCalculator<Utc> = LuckyTimeCalculator::new();
        assert!(calc.reveal("not a date", &now(9)).is_err());
        assert!(calc.current().is_none());
        assert!(calc.countdown(&now(9)).is_none());
    }

    #[test]
    fn countdown_tracks_the_clock() {
        let mut calc = LuckyTimeCalculator::new();
        calc.reveal("2002-12-07", &now(12)).unwrap();
        assert_eq!(calc.countdown(&now(12)).as_deref(), Some("04:11:00"));
        let later = Utc.with_ymd_and_hms(2024, 3, 15, 16, 11, 0).unwrap();
        assert_eq!(calc.next_lucky(&later).unwrap().label, "Today 22:11");
    }

    #[test]
    fn status_uses_birth_weekday() {
        let mut calc = LuckyTimeCalculator::new();
        calc.reveal("2002-12-07", &now(16)).unwrap();
        assert_eq!(calc.time_status(&now(16)), Some(TimeStatus::Lucky));
    }

    #[test]
    fn personal_day_rolls_with_date() {
        let mut calc = LuckyTimeCalculator::new();
        calc.reveal("2002-12-07", &now(12)).unwrap();
        let tomorrow = Utc.with_ymd_and_hms(2024, 3, 16, 0, 5, 0).unwrap();
        // 2062 -> 10 -> 1
        assert_eq!(calc.personal_day_at(&tomorrow).unwrap().get(), 1);
    }
}
