//! Tenure calculation.
//!
//! Tenure is measured in days between the hire date and an explicit
//! evaluation date, converted to years and rounded to the configured step.
//! Eligibility is governed only by the raw day count, never by the rounded
//! year figure: an employee with 200 days of service shows a rounded tenure of
//! 0.5 years and is eligible, while one with 170 days also rounds to 0.5 but
//! is not.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::TenurePolicy;

/// The outcome of a tenure calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureResult {
    /// Days from the hire date to the evaluation date.
    pub service_days: i64,
    /// Years of service rounded to the policy step.
    pub tenure_years: Decimal,
    /// True if `service_days` meets the minimum service floor.
    pub has_minimum_service: bool,
}

/// Computes tenure at `evaluation_date`.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::config::TenurePolicy;
/// use leave_adjudicator::rules::calculate_tenure;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = TenurePolicy {
///     days_per_year: 365,
///     minimum_service_days: 180,
///     rounding_step: Decimal::new(5, 1),
/// };
/// let result = calculate_tenure(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     &policy,
/// );
/// assert_eq!(result.service_days, 90);
/// assert!(!result.has_minimum_service);
/// ```
pub fn calculate_tenure(
    hire_date: NaiveDate,
    evaluation_date: NaiveDate,
    policy: &TenurePolicy,
) -> TenureResult {
    let service_days = (evaluation_date - hire_date).num_days();
    let raw_years = Decimal::from(service_days) / Decimal::from(policy.days_per_year);
    let steps = (raw_years / policy.rounding_step)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    TenureResult {
        service_days,
        tenure_years: (steps * policy.rounding_step).normalize(),
        has_minimum_service: service_days >= policy.minimum_service_days,
    }
}
