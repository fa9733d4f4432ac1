//! Restricted period overlap detection.

use crate::config::RestrictedPeriod;
use crate::models::{DateInterval, RestrictedOverlap};

/// Checks the request against the restricted windows in configured order.
///
/// A window overlaps when `request.start <= window.end` and
/// `request.end >= window.start`. Only the first overlapping window is
/// reported.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::config::RestrictedPeriod;
/// use leave_adjudicator::models::DateInterval;
/// use leave_adjudicator::rules::find_restricted_overlap;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let periods = vec![RestrictedPeriod {
///     start: d(12, 16),
///     end: d(12, 31),
///     label: "Year-end closing".to_string(),
/// }];
/// let request = DateInterval::new(d(12, 10), d(12, 16)).unwrap();
///
/// let overlap = find_restricted_overlap(&request, &periods);
/// assert!(overlap.flag);
/// assert_eq!(overlap.reason_label.as_deref(), Some("Year-end closing"));
/// ```
pub fn find_restricted_overlap(
    interval: &DateInterval,
    periods: &[RestrictedPeriod],
) -> RestrictedOverlap {
    periods
        .iter()
        .find(|period| interval.start() <= period.end && interval.end() >= period.start)
        .map(|period| RestrictedOverlap::matched(period.label.clone()))
        .unwrap_or_else(RestrictedOverlap::none)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn periods() -> Vec<RestrictedPeriod> {
        vec![
            RestrictedPeriod {
                start: date(2024, 12, 16),
                end: date(2024, 12, 31),
                label: "Yıl sonu kapanış dönemi".to_string(),
            },
            RestrictedPeriod {
                start: date(2024, 12, 23),
                end: date(2025, 1, 3),
                label: "Yıllık envanter sayımı".to_string(),
            },
        ]
    }

    fn request(start: NaiveDate, end: NaiveDate) -> DateInterval {
        DateInterval::new(start, end).unwrap()
    }

    #[test]
    fn test_no_overlap() {
        let overlap = find_restricted_overlap(
            &request(date(2024, 11, 1), date(2024, 11, 5)),
            &periods(),
        );
        assert_eq!(overlap, RestrictedOverlap::none());
    }

    #[test]
    fn test_first_window_wins_when_both_overlap() {
        let overlap = find_restricted_overlap(
            &request(date(2024, 12, 24), date(2024, 12, 27)),
            &periods(),
        );
        assert_eq!(
            overlap.reason_label.as_deref(),
            Some("Yıl sonu kapanış dönemi")
        );
    }

    #[test]
    fn test_list_order_decides_not_date_order() {
        let mut reversed = periods();
        reversed.reverse();
        let overlap = find_restricted_overlap(
            &request(date(2024, 12, 24), date(2024, 12, 27)),
            &reversed,
        );
        assert_eq!(
            overlap.reason_label.as_deref(),
            Some("Yıllık envanter sayımı")
        );
    }

    #[test]
    fn test_boundary_days_overlap() {
        let last_day = find_restricted_overlap(
            &request(date(2025, 1, 3), date(2025, 1, 6)),
            &periods(),
        );
        assert_eq!(
            last_day.reason_label.as_deref(),
            Some("Yıllık envanter sayımı")
        );

        let day_after = find_restricted_overlap(
            &request(date(2025, 1, 4), date(2025, 1, 6)),
            &periods(),
        );
        assert!(!day_after.flag);
    }

    #[test]
    fn test_request_enclosing_window_overlaps() {
        let overlap = find_restricted_overlap(
            &request(date(2024, 12, 1), date(2025, 2, 1)),
            &periods(),
        );
        assert!(overlap.flag);
    }

    #[test]
    fn test_empty_window_list() {
        let overlap =
            find_restricted_overlap(&request(date(2024, 12, 24), date(2024, 12, 27)), &[]);
        assert!(!overlap.flag);
    }
}
