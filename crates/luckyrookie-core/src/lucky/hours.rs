//! Lucky hours, the upcoming lucky moments built from them, and the
//! countdown to the next one.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::numerology::PersonalDayNumber;

/// Every lucky moment falls at this minute past the hour.
pub const LUCKY_MINUTE: u32 = 11;

/// Hours used when a day number has no table entry.
pub const DEFAULT_LUCKY_HOURS: [u32; 3] = [11, 16, 22];

const LUCKY_HOUR_TABLE: [[u32; 3]; 9] = [
    [9, 15, 21],
    [10, 16, 20],
    [11, 14, 19],
    [8, 13, 18],
    [12, 17, 22],
    [7, 14, 20],
    [6, 15, 23],
    [9, 18, 21],
    [11, 16, 22],
];

/// Three lucky hours for a day number `1..=9`; anything else gets
/// [`DEFAULT_LUCKY_HOURS`].
pub fn lucky_hours_for(day_number: u8) -> [u32; 3] {
    match day_number {
        1..=9 => LUCKY_HOUR_TABLE[usize::from(day_number - 1)],
        _ => DEFAULT_LUCKY_HOURS,
    }
}

pub fn lucky_hours(day: PersonalDayNumber) -> [u32; 3] {
    lucky_hours_for(day.get())
}

/// Whether a slot is still ahead today or was rolled to tomorrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotDay {
    Today,
    Next,
}

/// One upcoming lucky moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuckyTimeSlot<Tz: TimeZone> {
    /// `Today HH:11` or `Next HH:11`.
    pub label: String,
    pub day: SlotDay,
    pub when: DateTime<Tz>,
}

/// Build one slot per hour at `today hh:11:00`, rolling any candidate at or
/// before `now` forward exactly one day. Sorted ascending by time.
///
/// Always yields one slot per input hour. An hour outside `0..=23` is
/// replaced by the [`DEFAULT_LUCKY_HOURS`] entry at the same position.
pub fn build_lucky_times<Tz: TimeZone>(
    today: NaiveDate,
    hours: &[u32],
    now: &DateTime<Tz>,
) -> Vec<LuckyTimeSlot<Tz>> {
    let tz = now.timezone();
    let mut out: Vec<LuckyTimeSlot<Tz>> = hours
        .iter()
        .enumerate()
        .map(|(i, &requested)| {
            let h = if requested < 24 {
                requested
            } else {
                tracing::warn!(hour = requested, "lucky hour out of range, using default");
                DEFAULT_LUCKY_HOURS[i % DEFAULT_LUCKY_HOURS.len()]
            };
            let time = NaiveTime::from_hms_opt(h, LUCKY_MINUTE, 0).unwrap_or_default();
            let candidate = resolve_local(&tz, today.and_time(time));
            match today.checked_add_days(Days::new(1)) {
                Some(tomorrow) if candidate <= *now => LuckyTimeSlot {
                    label: format!("Next {h:02}:{LUCKY_MINUTE:02}"),
                    day: SlotDay::Next,
                    when: resolve_local(&tz, tomorrow.and_time(time)),
                },
                _ => LuckyTimeSlot {
                    label: format!("Today {h:02}:{LUCKY_MINUTE:02}"),
                    day: SlotDay::Today,
                    when: candidate,
                },
            }
        })
        .collect();
    out.sort_by(|a, b| a.when.cmp(&b.when));
    out
}

/// First slot strictly after `now`, else the first slot. `None` only for an
/// empty list.
pub fn next_lucky_moment<'a, Tz: TimeZone>(
    slots: &'a [LuckyTimeSlot<Tz>],
    now: &DateTime<Tz>,
) -> Option<&'a LuckyTimeSlot<Tz>> {
    slots
        .iter()
        .find(|slot| slot.when > *now)
        .or_else(|| slots.first())
}

/// `HH:MM:SS` of a remaining duration, floored to whole seconds and clamped
/// at zero.
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_milliseconds().max(0) / 1000;
    let hh = total / 3600;
    let mm = (total % 3600) / 60;
    let ss = total % 60;
    format!("{hh:02}:{mm:02}:{ss:02}")
}

pub fn countdown_until<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    format_countdown(target.clone().signed_duration_since(now.clone()))
}

/// Map a wall-clock time into `tz`. Ambiguous times take the earlier
/// instant; times inside a DST gap move forward by the gap's hour.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}
