//! Policy rules for the Leave Adjudication Engine.
//!
//! This module contains the date range parser, the working day counter, the
//! tenure and entitlement calculations, and the independent policy predicates
//! (restricted periods, summer quota, holiday bridging, family urgency and
//! position priority) composed by [`PolicyRuleSet`].

mod bridge_holiday;
mod date_range;
mod entitlement;
mod position_priority;
mod restricted_period;
mod rule_set;
mod summer_quota;
mod tenure;
mod urgency;
mod working_days;

pub use bridge_holiday::find_bridged_holiday;
pub use date_range::parse_date_range;
pub use entitlement::EntitlementTable;
pub use position_priority::{priority_rank, rank_by_priority};
pub use restricted_period::find_restricted_overlap;
pub use rule_set::{PolicyRuleSet, RuleEvaluation};
pub use summer_quota::summer_quota_exceeded;
pub use tenure::{TenureResult, calculate_tenure};
pub use urgency::{UrgencyKeywords, UrgencyMatch};
pub use working_days::count_working_days;
