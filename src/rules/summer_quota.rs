//! Seasonal quota check.

use crate::config::SummerQuotaPolicy;
use crate::models::DateInterval;

/// Returns true if the request lies entirely inside the season and takes
/// more working days than the seasonal cap.
///
/// Partial overlap with the season never triggers the rule.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::config::SummerQuotaPolicy;
/// use leave_adjudicator::models::DateInterval;
/// use leave_adjudicator::rules::summer_quota_exceeded;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let policy = SummerQuotaPolicy {
///     season_start: d(6, 1),
///     season_end: d(8, 31),
///     max_working_days: 6,
/// };
/// let request = DateInterval::new(d(6, 1), d(6, 10)).unwrap();
/// assert!(summer_quota_exceeded(&request, 8, &policy));
/// assert!(!summer_quota_exceeded(&request, 6, &policy));
/// ```
pub fn summer_quota_exceeded(
    interval: &DateInterval,
    working_days: u32,
    policy: &SummerQuotaPolicy,
) -> bool {
    let inside_season =
        interval.start() >= policy.season_start && interval.end() <= policy.season_end;
    inside_season && working_days > policy.max_working_days
}
