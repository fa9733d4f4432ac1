//! Position priority ranking.
//!
//! The rank is contextual input for resolving concurrent requests. This
//! engine never compares requests itself; callers holding several candidates
//! use [`rank_by_priority`].

use rust_decimal::Decimal;

use crate::models::{Employee, PriorityRank};

/// Builds the priority key for an employee with the given tenure.
pub fn priority_rank(employee: &Employee, tenure_years: Decimal) -> PriorityRank {
    PriorityRank {
        position_level: employee.position_level,
        tenure_years,
    }
}

/// Sorts candidates so the highest priority comes first.
///
/// Higher position level ranks first; within a level, longer tenure ranks
/// first. Equal ranks keep their original order.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::models::PriorityRank;
/// use leave_adjudicator::rules::rank_by_priority;
/// use rust_decimal::Decimal;
///
/// let mut candidates = vec![
///     ("req_a", PriorityRank { position_level: 1, tenure_years: Decimal::from(9) }),
///     ("req_b", PriorityRank { position_level: 3, tenure_years: Decimal::from(2) }),
///     ("req_c", PriorityRank { position_level: 1, tenure_years: Decimal::from(12) }),
/// ];
/// rank_by_priority(&mut candidates, |(_, rank)| *rank);
///
/// let order: Vec<&str> = candidates.iter().map(|(id, _)| *id).collect();
/// assert_eq!(order, vec!["req_b", "req_c", "req_a"]);
/// ```
pub fn rank_by_priority<T, F>(candidates: &mut [T], key: F)
where
    F: Fn(&T) -> PriorityRank,
{
    candidates.sort_by(|a, b| key(b).cmp(&key(a)));
}
