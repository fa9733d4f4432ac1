//! Holiday bridging detection.
//!
//! A request bridges a holiday when it covers both the day before and the
//! day after it. Bridging earns a one-day extension recommendation, which is
//! communicated through the narrative; the requested interval is never changed.

use crate::config::Holiday;
use crate::models::DateInterval;

/// Returns the first listed holiday that the request bridges.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::config::Holiday;
/// use leave_adjudicator::models::DateInterval;
/// use leave_adjudicator::rules::find_bridged_holiday;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let holidays = vec![Holiday {
///     date: d(4, 23),
///     name: "Ulusal Egemenlik ve Çocuk Bayramı".to_string(),
/// }];
///
/// let bridging = DateInterval::new(d(4, 22), d(4, 24)).unwrap();
/// assert!(find_bridged_holiday(&bridging, &holidays).is_some());
///
/// let one_side = DateInterval::new(d(4, 20), d(4, 22)).unwrap();
/// assert!(find_bridged_holiday(&one_side, &holidays).is_none());
/// ```
pub fn find_bridged_holiday<'a>(
    interval: &DateInterval,
    holidays: &'a [Holiday],
) -> Option<&'a Holiday> {
    holidays.iter().find(|holiday| {
        match (holiday.date.pred_opt(), holiday.date.succ_opt()) {
            (Some(before), Some(after)) => interval.contains(before) && interval.contains(after),
            _ => false,
        }
    })
}
