//! Leave request model.
//!
//! This module contains the [`LeaveRequest`] type submitted by employees and
//! the slot where the latest adjudication [`Decision`] is attached.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Decision;

/// A leave request as submitted by an employee.
///
/// # Example
///
/// ```
/// use leave_adjudicator::models::LeaveRequest;
///
/// let request = LeaveRequest::new(
///     "req_001",
///     "emp_001",
///     "01.06.2024-10.06.2024",
///     "Yıllık izin",
/// );
/// assert!(request.validate().is_ok());
/// assert!(request.ai_analysis.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee who submitted the request.
    pub employee_id: String,
    /// Requested dates as `DD.MM.YYYY-DD.MM.YYYY`.
    pub date_range_text: String,
    /// Free-text reason given by the employee.
    #[serde(default)]
    pub description: String,
    /// The latest adjudication, if any.
    #[serde(
        default,
        rename = "aiAnalysis",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_analysis: Option<Decision>,
}

impl LeaveRequest {
    /// Creates a request with no decision attached.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        date_range_text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            date_range_text: date_range_text.into(),
            description: description.into(),
            ai_analysis: None,
        }
    }

    /// Checks that the required fields are present.
    ///
    /// The date range format itself is checked by the date range parser.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("id", &self.id),
            ("employee_id", &self.employee_id),
            ("date_range_text", &self.date_range_text),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::InvalidRequest {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Attaches a decision, replacing any earlier one.
    pub fn record_decision(&mut self, decision: Decision) {
        self.ai_analysis = Some(decision);
    }
}
