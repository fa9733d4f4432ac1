//! Response types for the Leave Adjudication Engine API.
//!
//! This module defines the success bodies, the error response structure and
//! the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adjudication::{Adjudication, EvaluationState};
use crate::backend::BackendError;
use crate::error::EngineError;
use crate::models::{AuditTrace, Decision, RuleFacts};

/// Response body for a successful `/evaluate` call.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    /// Unique identifier of this evaluation.
    pub evaluation_id: Uuid,
    /// The evaluated request.
    pub request_id: String,
    /// The decision to store on the request record.
    #[serde(rename = "aiAnalysis")]
    pub ai_analysis: Decision,
    /// The policy facts handed to the reasoning backend.
    pub facts: RuleFacts,
    /// How each fact and the decision were reached.
    pub audit_trace: AuditTrace,
}

impl From<Adjudication> for EvaluationResponse {
    fn from(adjudication: Adjudication) -> Self {
        Self {
            evaluation_id: adjudication.evaluation_id,
            request_id: adjudication.request_id,
            ai_analysis: adjudication.decision,
            facts: adjudication.facts,
            audit_trace: adjudication.audit_trace,
        }
    }
}

/// Response body for `/evaluations/{request_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationStatusResponse {
    /// Lifecycle state: `no_decision`, `evaluating`, `decided` or `failed`.
    pub state: &'static str,
    /// The latest successful decision.
    #[serde(rename = "aiAnalysis", skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<Decision>,
    /// Why the latest evaluation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&EvaluationState> for EvaluationStatusResponse {
    fn from(state: &EvaluationState) -> Self {
        let (name, error) = match state {
            EvaluationState::NoDecision => ("no_decision", None),
            EvaluationState::Evaluating { .. } => ("evaluating", None),
            EvaluationState::Decided { .. } => ("decided", None),
            EvaluationState::Failed { error, .. } => ("failed", Some(error.clone())),
        };
        Self {
            state: name,
            ai_analysis: state.current_decision().cloned(),
            error,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an error for a request that was never evaluated.
    pub fn evaluation_not_found(request_id: &str) -> Self {
        Self::with_details(
            "EVALUATION_NOT_FOUND",
            format!("No evaluation recorded for request '{}'", request_id),
            "Submit the request to /evaluate first",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidDateFormat { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    message,
                    "Dates must be given as DD.MM.YYYY-DD.MM.YYYY with the end on or after the start",
                ),
            ),
            EngineError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            EngineError::InvalidRequest { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_REQUEST",
                    message,
                    "The leave request contains invalid information",
                ),
            ),
            EngineError::EvaluationInProgress { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("EVALUATION_IN_PROGRESS", message),
            ),
            EngineError::Backend(BackendError::RateLimited { .. }) => (
                StatusCode::TOO_MANY_REQUESTS,
                ApiError::new("BACKEND_RATE_LIMITED", message),
            ),
            EngineError::Backend(BackendError::Timeout { .. }) => (
                StatusCode::GATEWAY_TIMEOUT,
                ApiError::new("BACKEND_TIMEOUT", message),
            ),
            EngineError::Backend(BackendError::Unavailable { .. }) => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("BACKEND_UNAVAILABLE", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let errors = [
            EngineError::InvalidDateFormat {
                input: "2024-06-01".to_string(),
                message: "expected DD.MM.YYYY".to_string(),
            },
            EngineError::InvalidEmployee {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            },
            EngineError::InvalidRequest {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            },
        ];
        for error in errors {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_backend_errors_map_to_gateway_statuses() {
        let cases = [
            (
                BackendError::RateLimited {
                    retry_after_secs: None,
                },
                StatusCode::TOO_MANY_REQUESTS,
                "BACKEND_RATE_LIMITED",
            ),
            (
                BackendError::Timeout { seconds: 30 },
                StatusCode::GATEWAY_TIMEOUT,
                "BACKEND_TIMEOUT",
            ),
            (
                BackendError::Unavailable {
                    message: "HTTP 503".to_string(),
                },
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNAVAILABLE",
            ),
        ];
        for (backend_error, status, code) in cases {
            let response: ApiErrorResponse = EngineError::from(backend_error).into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_in_progress_is_conflict() {
        let response: ApiErrorResponse = EngineError::EvaluationInProgress {
            request_id: "req_1".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert!(response.error.message.contains("req_1"));
    }

    #[test]
    fn test_failed_state_reports_error_and_prior_decision() {
        let state = EvaluationState::Failed {
            error: "Reasoning backend failure: HTTP 503".to_string(),
            previous: None,
        };
        let json = serde_json::to_value(EvaluationStatusResponse::from(&state)).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["error"], "Reasoning backend failure: HTTP 503");
        assert!(json.get("aiAnalysis").is_none());
    }
}
