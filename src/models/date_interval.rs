//! Inclusive calendar date intervals.
//!
//! This module contains the [`DateInterval`] type used for requested leave
//! periods, restricted windows and the seasonal quota window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar days, `start <= end`.
///
/// # Example
///
/// ```
/// use leave_adjudicator::models::DateInterval;
/// use chrono::NaiveDate;
///
/// let interval = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(interval.calendar_days(), 10);
/// assert!(interval.contains(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateInterval")]
pub struct DateInterval {
    /// First day of the interval (inclusive).
    start: NaiveDate,
    /// Last day of the interval (inclusive).
    end: NaiveDate,
}

/// Unchecked wire form; deserialization goes through [`DateInterval::new`].
#[derive(Deserialize)]
struct RawDateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateInterval> for DateInterval {
    type Error = EngineError;

    fn try_from(raw: RawDateInterval) -> EngineResult<Self> {
        DateInterval::new(raw.start, raw.end)
    }
}

impl DateInterval {
    /// Creates a new interval, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidDateFormat {
                input: format!("{}..{}", start, end),
                message: format!("end date {} is before start date {}", end, start),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day of the interval.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the interval.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn calendar_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Returns true if `date` falls within the interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if `other` lies entirely within this interval.
    pub fn contains_interval(&self, other: &DateInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns true if the two intervals share at least one day.
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Iterates every day of the interval in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
