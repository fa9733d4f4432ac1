//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave policy
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BackendConfig, CalendarConfig, EngineConfig, KeywordConfig, PolicyConfig};

/// Loads and validates the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/leave_policy/
/// ├── policy.yaml    # Tenure, entitlement tiers, summer quota, rest day
/// ├── calendar.yaml  # Restricted periods and public holidays
/// ├── keywords.yaml  # Relation and urgency keyword sets
/// └── backend.yaml   # Reasoning backend settings
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_adjudicator::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/leave_policy")?;
/// for period in &loader.config().calendar().restricted_periods {
///     println!("{}: {} - {}", period.label, period.start, period.end);
/// }
/// # Ok::<(), leave_adjudicator::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or
    /// describes an inconsistent policy.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let calendar = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;
        let keywords = Self::load_yaml::<KeywordConfig>(&path.join("keywords.yaml"))?;
        let backend = Self::load_yaml::<BackendConfig>(&path.join("backend.yaml"))?;

        Self::from_config(EngineConfig::new(policy, calendar, keywords, backend))
    }

    /// Wraps an already assembled configuration after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &EngineConfig) -> EngineResult<()> {
        let policy = config.policy();

        if policy.tenure.days_per_year == 0 {
            return Err(invalid("tenure.days_per_year must be positive"));
        }
        if policy.tenure.rounding_step <= Decimal::ZERO {
            return Err(invalid("tenure.rounding_step must be positive"));
        }
        if policy.entitlement_tiers.is_empty() {
            return Err(invalid("at least one entitlement tier is required"));
        }
        // Tiers are sorted by EngineConfig::new, so days must never drop.
        if policy
            .entitlement_tiers
            .windows(2)
            .any(|pair| pair[1].days < pair[0].days)
        {
            return Err(invalid("entitlement tier days must not decrease with tenure"));
        }

        let quota = &policy.summer_quota;
        if quota.season_end < quota.season_start {
            return Err(invalid(format!(
                "summer season ends ({}) before it starts ({})",
                quota.season_end, quota.season_start
            )));
        }

        if let Some(period) = config
            .calendar()
            .restricted_periods
            .iter()
            .find(|p| p.end < p.start)
        {
            return Err(invalid(format!(
                "restricted period '{}' ends before it starts",
                period.label
            )));
        }

        let keywords = config.keywords();
        if keywords.relations.iter().all(|k| k.trim().is_empty()) {
            return Err(invalid("relation keyword set must not be empty"));
        }
        if keywords.urgencies.iter().all(|k| k.trim().is_empty()) {
            return Err(invalid("urgency keyword set must not be empty"));
        }

        if config.backend().retry.max_attempts == 0 {
            return Err(invalid("backend.retry.max_attempts must be at least 1"));
        }
        if config.backend().timeout_secs == 0 {
            return Err(invalid("backend.timeout_secs must be at least 1"));
        }
        let retry = &config.backend().retry;
        if retry.max_backoff_ms < retry.initial_backoff_ms {
            return Err(invalid(format!(
                "backend.retry.max_backoff_ms ({}) is below initial_backoff_ms ({})",
                retry.max_backoff_ms, retry.initial_backoff_ms
            )));
        }

        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}
