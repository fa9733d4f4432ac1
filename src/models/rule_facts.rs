//! Policy facts derived for a single evaluation.
//!
//! [`RuleFacts`] is built fresh for every evaluation call, handed to the prompt
//! composer, and never stored on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DateInterval;

/// Result of checking the requested interval against the restricted windows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RestrictedOverlap {
    /// True if any restricted window overlaps the request.
    pub flag: bool,
    /// Label of the first overlapping window, in configured order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_label: Option<String>,
}

impl RestrictedOverlap {
    /// No restricted window overlaps the request.
    pub fn none() -> Self {
        Self::default()
    }

    /// The request overlaps the window carrying `label`.
    pub fn matched(label: impl Into<String>) -> Self {
        Self {
            flag: true,
            reason_label: Some(label.into()),
        }
    }
}

/// Ordering key for resolving conflicting concurrent requests.
///
/// Compares by position level first and tenure second, so a greater rank
/// takes precedence.
///
/// # Example
///
/// ```
/// use leave_adjudicator::models::PriorityRank;
/// use rust_decimal::Decimal;
///
/// let manager = PriorityRank { position_level: 3, tenure_years: Decimal::new(15, 1) };
/// let veteran = PriorityRank { position_level: 1, tenure_years: Decimal::from(20) };
/// assert!(manager > veteran);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PriorityRank {
    /// Seniority level of the employee's position.
    pub position_level: u8,
    /// Rounded tenure in years.
    pub tenure_years: Decimal,
}

/// Every policy signal computed for one leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFacts {
    /// The parsed request interval.
    pub interval: DateInterval,
    /// Calendar days in the interval.
    pub calendar_days: u32,
    /// Days in the interval excluding the weekly rest day.
    pub working_days: u32,
    /// Tenure rounded to half-year granularity.
    pub tenure_years: Decimal,
    /// True if the minimum service floor is met.
    pub has_minimum_service: bool,
    /// Annual leave entitlement for the tenure tier.
    pub entitlement_days: u32,
    /// True if the working days exceed the employee's remaining balance.
    pub exceeds_remaining_balance: bool,
    /// Restricted window overlap.
    pub restricted_overlap: RestrictedOverlap,
    /// True if the request sits inside the season and exceeds its cap.
    pub summer_quota_exceeded: bool,
    /// True if the request bridges a public holiday.
    pub bridges_holiday: bool,
    /// Name of the first bridged holiday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridged_holiday: Option<String>,
    /// True if the description reports a close-family emergency.
    pub first_degree_urgent: bool,
    /// Priority key for conflicting requests.
    pub priority: PriorityRank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_orders_level_before_tenure() {
        let junior_long = PriorityRank {
            position_level: 1,
            tenure_years: Decimal::from(12),
        };
        let senior_short = PriorityRank {
            position_level: 2,
            tenure_years: Decimal::new(5, 1),
        };
        let senior_long = PriorityRank {
            position_level: 2,
            tenure_years: Decimal::from(4),
        };

        assert!(senior_short > junior_long);
        assert!(senior_long > senior_short);
    }

    #[test]
    fn test_restricted_overlap_constructors() {
        assert!(!RestrictedOverlap::none().flag);
        let matched = RestrictedOverlap::matched("Yıl sonu kapanışı");
        assert!(matched.flag);
        assert_eq!(matched.reason_label.as_deref(), Some("Yıl sonu kapanışı"));
    }

    #[test]
    fn test_restricted_overlap_omits_missing_label() {
        let json = serde_json::to_value(RestrictedOverlap::none()).unwrap();
        assert_eq!(json, serde_json::json!({ "flag": false }));
    }
}
