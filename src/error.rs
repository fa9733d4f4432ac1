//! Error types for the Leave Adjudication Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while adjudicating a leave request.

use thiserror::Error;

use crate::backend::BackendError;

/// Broad classification of an [`EngineError`].
///
/// Callers use this to decide how to surface a failed evaluation: validation
/// failures are deterministic input defects and must not be retried, while
/// external failures are transient and may be retried with backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The engine configuration is missing or inconsistent.
    Configuration,
    /// The request or employee facts are malformed.
    Validation,
    /// The reasoning backend failed.
    External,
}

/// The main error type for the Leave Adjudication Engine.
///
/// # Example
///
/// ```
/// use leave_adjudicator::error::{EngineError, ErrorKind};
///
/// let error = EngineError::InvalidDateFormat {
///     input: "2024-06-01".to_string(),
///     message: "expected DD.MM.YYYY-DD.MM.YYYY".to_string(),
/// };
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// assert!(!error.is_retryable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a policy invariant.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated invariant.
        message: String,
    },

    /// The requested date range text is malformed or inverted.
    #[error("Invalid date range '{input}': {message}")]
    InvalidDateFormat {
        /// The offending date range text.
        input: String,
        /// A description of what made the range invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A leave request was invalid.
    #[error("Invalid leave request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An evaluation for this request is already running.
    #[error("Evaluation already in progress for request '{request_id}'")]
    EvaluationInProgress {
        /// The request being evaluated.
        request_id: String,
    },

    /// The reasoning backend failed to produce a narrative.
    #[error("Reasoning backend failure: {0}")]
    Backend(#[from] BackendError),
}

impl EngineError {
    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ErrorKind::Configuration,
            EngineError::InvalidDateFormat { .. }
            | EngineError::InvalidEmployee { .. }
            | EngineError::InvalidRequest { .. }
            | EngineError::EvaluationInProgress { .. } => ErrorKind::Validation,
            EngineError::Backend(_) => ErrorKind::External,
        }
    }

    /// Returns true if the caller may retry the evaluation with backoff.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::External
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_invalid_date_format_displays_input_and_message() {
        let error = EngineError::InvalidDateFormat {
            input: "31.06.2024-02.07.2024".to_string(),
            message: "31.06.2024 is not a calendar date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range '31.06.2024-02.07.2024': 31.06.2024 is not a calendar date"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "position_level".to_string(),
            message: "expected 2 for Uzman, got 3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'position_level': expected 2 for Uzman, got 3"
        );
    }

    #[test]
    fn test_backend_error_converts_and_is_external() {
        let error: EngineError = BackendError::Timeout { seconds: 30 }.into();
        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.is_retryable());
        assert_eq!(
            error.to_string(),
            "Reasoning backend failure: Reasoning backend timed out after 30s"
        );
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let errors = [
            EngineError::InvalidDateFormat {
                input: "x".to_string(),
                message: "bad".to_string(),
            },
            EngineError::InvalidRequest {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            },
            EngineError::EvaluationInProgress {
                request_id: "req_1".to_string(),
            },
        ];
        for error in errors {
            assert_eq!(error.kind(), ErrorKind::Validation);
            assert!(!error.is_retryable());
        }
    }

    #[test]
    fn test_config_errors_are_configuration_kind() {
        let error = EngineError::InvalidConfig {
            message: "entitlement tiers must not decrease".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_backend_error() -> Result<(), BackendError> {
            Err(BackendError::RateLimited {
                retry_after_secs: None,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_backend_error()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(EngineError::Backend(_))));
    }
}
