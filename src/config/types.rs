//! Configuration types for leave adjudication.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Parameters of the tenure calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct TenurePolicy {
    /// Days counted as one year of service.
    pub days_per_year: u32,
    /// Minimum days of service before leave eligibility.
    pub minimum_service_days: i64,
    /// Granularity tenure is rounded to, in years.
    pub rounding_step: Decimal,
}

/// A single entitlement tier.
///
/// A tier applies when tenure is above `min_years`, or equal to it when
/// `inclusive` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementTier {
    /// Lower tenure bound of the tier.
    pub min_years: Decimal,
    /// Whether the lower bound itself belongs to the tier.
    #[serde(default = "default_inclusive")]
    pub inclusive: bool,
    /// Annual leave days granted in this tier.
    pub days: u32,
}

fn default_inclusive() -> bool {
    true
}

/// The seasonal quota rule.
#[derive(Debug, Clone, Deserialize)]
pub struct SummerQuotaPolicy {
    /// First day of the season.
    pub season_start: NaiveDate,
    /// Last day of the season.
    pub season_end: NaiveDate,
    /// Working days a single request may take inside the season.
    pub max_working_days: u32,
}

/// Policy thresholds from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// The weekly rest day excluded from working day counts.
    pub rest_day: Weekday,
    /// Tenure calculation parameters.
    pub tenure: TenurePolicy,
    /// Entitlement tiers, ordered by `min_years`.
    pub entitlement_tiers: Vec<EntitlementTier>,
    /// Seasonal quota rule.
    pub summer_quota: SummerQuotaPolicy,
}

/// A window in which leave conflicts with an organizational commitment.
#[derive(Debug, Clone, Deserialize)]
pub struct RestrictedPeriod {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
    /// Reason shown to the reviewer.
    pub label: String,
}

/// A public holiday.
#[derive(Debug, Clone, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Calendar tables from calendar.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Restricted windows, in precedence order.
    #[serde(default)]
    pub restricted_periods: Vec<RestrictedPeriod>,
    /// Public holidays considered for bridging.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// Keyword sets from keywords.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    /// Words naming a first-degree relative.
    pub relations: Vec<String>,
    /// Words naming an urgent event.
    pub urgencies: Vec<String>,
    /// Wider-family words blanked out before relations are matched,
    /// e.g. `babaannem` would otherwise match `annem`.
    #[serde(default)]
    pub exclusions: Vec<String>,
}

/// Retry behaviour for transient backend failures.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled on each further retry.
    pub initial_backoff_ms: u64,
    /// Longest single wait. A `Retry-After` above this is not honoured and
    /// the rate limit is reported instead.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Reasoning backend settings from backend.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion length limit.
    pub max_tokens: u32,
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Retry policy.
    #[serde(default)]
    pub retry: RetryPolicy,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    policy: PolicyConfig,
    calendar: CalendarConfig,
    keywords: KeywordConfig,
    backend: BackendConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// Entitlement tiers are sorted by their lower bound.
    pub fn new(
        policy: PolicyConfig,
        calendar: CalendarConfig,
        keywords: KeywordConfig,
        backend: BackendConfig,
    ) -> Self {
        let mut policy = policy;
        policy.entitlement_tiers.sort_by(|a, b| {
            a.min_years
                .cmp(&b.min_years)
                .then_with(|| b.inclusive.cmp(&a.inclusive))
        });
        Self {
            policy,
            calendar,
            keywords,
            backend,
        }
    }

    /// Returns the policy thresholds.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns the calendar tables.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Returns the keyword sets.
    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    /// Returns the backend settings.
    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }
}
