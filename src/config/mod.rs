//! Configuration loading and management for the Leave Adjudication Engine.
//!
//! This module provides functionality to load the leave policy from YAML files:
//! tenure and entitlement thresholds, restricted periods and holidays, urgency
//! keyword sets, and reasoning backend settings.
//!
//! # Example
//!
//! ```no_run
//! use leave_adjudicator::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/leave_policy").unwrap();
//! println!("Summer cap: {}", loader.config().policy().summer_quota.max_working_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BackendConfig, CalendarConfig, EngineConfig, EntitlementTier, Holiday, KeywordConfig,
    PolicyConfig, RestrictedPeriod, RetryPolicy, SummerQuotaPolicy, TenurePolicy,
};
