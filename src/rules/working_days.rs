//! Working day counting.

use chrono::{Datelike, Weekday};

use crate::models::DateInterval;

/// Counts the days in `interval` whose weekday is not `rest_day`.
///
/// Both ends are included. Public holidays are not excluded here; holiday
/// effects are handled by the bridging rule.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::models::DateInterval;
/// use leave_adjudicator::rules::count_working_days;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2024-06-01 is a Saturday; the 2nd and the 9th are Sundays.
/// let interval = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(count_working_days(&interval, Weekday::Sun), 8);
/// ```
pub fn count_working_days(interval: &DateInterval, rest_day: Weekday) -> u32 {
    interval
        .days()
        .filter(|day| day.weekday() != rest_day)
        .count() as u32
}
