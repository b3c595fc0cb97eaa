//! Lucky, love, and unlucky windows keyed by the weekday of birth.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

/// Inclusive minute-of-day window. `end < start` wraps past midnight;
/// `24:00` is minute 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: u16,
    end: u16,
}

impl TimeRange {
    pub const fn new(start_h: u16, start_m: u16, end_h: u16, end_m: u16) -> Self {
        Self {
            start: start_h * 60 + start_m,
            end: end_h * 60 + end_m,
        }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = (time.hour() * 60 + time.minute()) as u16;
        if self.end < self.start {
            minute >= self.start || minute <= self.end
        } else {
            minute >= self.start && minute <= self.end
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02} - {:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayTimeRanges {
    pub lucky: &'static [TimeRange],
    pub love: &'static [TimeRange],
    pub unlucky: &'static [TimeRange],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeStatus {
    Lucky,
    Love,
    Unlucky,
    Neutral,
}

impl TimeStatus {
    pub fn message(self) -> &'static str {
        match self {
            TimeStatus::Lucky => "Lucky Time!",
            TimeStatus::Love => "Charming Time!",
            TimeStatus::Unlucky => "Avoid this time",
            TimeStatus::Neutral => "Neutral Time",
        }
    }
}

const fn r(sh: u16, sm: u16, eh: u16, em: u16) -> TimeRange {
    TimeRange::new(sh, sm, eh, em)
}

const SUNDAY: DayTimeRanges = DayTimeRanges {
    lucky: &[r(7, 31, 12, 30), r(20, 1, 24, 0)],
    love: &[r(12, 31, 13, 30), r(1, 1, 3, 0)],
    unlucky: &[r(6, 31, 7, 30), r(16, 1, 17, 0)],
};
const MONDAY: DayTimeRanges = DayTimeRanges {
    lucky: &[r(6, 1, 7, 0), r(13, 31, 19, 30)],
    love: &[r(20, 1, 24, 0)],
    unlucky: &[r(7, 1, 13, 0), r(0, 1, 3, 0)],
};
const TUESDAY: DayTimeRanges = DayTimeRanges {
    lucky: &[r(15, 1, 16, 0), r(19, 1, 21, 0)],
    love: &[r(10, 1, 13, 0), r(22, 1, 1, 1)],
    unlucky: &[r(3, 1, 6, 30)],
};
const WEDNESDAY: DayTimeRanges = DayTimeRanges {
    lucky: &[r(6, 1, 9, 30), r(14, 30, 19, 30)],
    love: &[r(21, 1, 1, 0), r(22, 1, 1, 1)],
    unlucky: &[r(9, 1, 14, 0)],
};
const THURSDAY: DayTimeRanges = DayTimeRanges {
    lucky: &[r(6, 1, 7, 0), r(9, 1, 13, 0)],
    love: &[r(13, 31, 19, 30)],
    unlucky: &[r(7, 1, 9, 0), r(1, 1, 3, 0)],
};
const FRIDAY: DayTimeRanges = DayTimeRanges {
    lucky: &[r(6, 1, 12, 0), r(15, 31, 16, 0)],
    love: &[r(19, 1, 23, 0)],
    unlucky: &[r(12, 1, 15, 0), r(23, 1, 3, 0)],
};
const SATURDAY: DayTimeRanges = DayTimeRanges {
    lucky: &[r(15, 1, 23, 0)],
    love: &[r(7, 1, 14, 0)],
    unlucky: &[r(14, 1, 15, 0), r(1, 1, 5, 0)],
};

pub fn ranges_for_weekday(weekday: Weekday) -> DayTimeRanges {
    match weekday {
        Weekday::Sun => SUNDAY,
        Weekday::Mon => MONDAY,
        Weekday::Tue => TUESDAY,
        Weekday::Wed => WEDNESDAY,
        Weekday::Thu => THURSDAY,
        Weekday::Fri => FRIDAY,
        Weekday::Sat => SATURDAY,
    }
}

pub fn ranges_for_birth(birth: NaiveDate) -> DayTimeRanges {
    ranges_for_weekday(birth.weekday())
}

/// Lucky windows win over love windows, which win over unlucky ones.
pub fn time_status(ranges: &DayTimeRanges, time: NaiveTime) -> TimeStatus {
    let hit = |list: &[TimeRange]| list.iter().any(|range| range.contains(time));
    if hit(ranges.lucky) {
        TimeStatus::Lucky
    } else if hit(ranges.love) {
        TimeStatus::Love
    } else if hit(ranges.unlucky) {
        TimeStatus::Unlucky
    } else {
        TimeStatus::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn ranges_are_inclusive() {
        let range = TimeRange::new(6, 1, 7, 0);
        assert!(range.contains(t(6, 1)));
        assert!(range.contains(t(7, 0)));
        assert!(!range.contains(t(6, 0)));
        assert!(!range.contains(t(7, 1)));
    }

    #[test]
    fn wrapping_range_covers_midnight() {
        let range = TimeRange::new(22, 1, 1, 1);
        assert!(range.contains(t(23, 59)));
        assert!(range.contains(t(0, 30)));
        assert!(range.contains(t(1, 1)));
        assert!(!range.contains(t(12, 0)));
    }

    #[test]
    fn range_display_matches_table_format() {
        assert_eq!(TimeRange::new(20, 1, 24, 0).to_string(), "20:01 - 24:00");
    }

    #[test]
    fn birth_weekday_selects_table() {
        // 2002-12-07 was a Saturday.
        let birth = NaiveDate::from_ymd_opt(2002, 12, 7).unwrap();
        let ranges = ranges_for_birth(birth);
        assert_eq!(ranges.lucky, SATURDAY.lucky);
    }

    #[test]
    fn status_priority_and_neutral() {
        let sat = ranges_for_weekday(Weekday::Sat);
        assert_eq!(time_status(&sat, t(16, 0)), TimeStatus::Lucky);
        assert_eq!(time_status(&sat, t(8, 0)), TimeStatus::Love);
        assert_eq!(time_status(&sat, t(2, 0)), TimeStatus::Unlucky);
        assert_eq!(time_status(&sat, t(6, 0)), TimeStatus::Neutral);
        assert_eq!(TimeStatus::Neutral.message(), "Neutral Time");
    }

    #[test]
    fn lucky_beats_overlapping_unlucky() {
        // Monday 06:30 is lucky; 00:30 is unlucky.
        let mon = ranges_for_weekday(Weekday::Mon);
        assert_eq!(time_status(&mon, t(6, 30)), TimeStatus::Lucky);
        assert_eq!(time_status(&mon, t(0, 30)), TimeStatus::Unlucky);
    }
}
