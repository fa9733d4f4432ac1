//! Request types for the Leave Adjudication Engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, LeaveRequest};

/// Request body for the `/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The leave request to adjudicate.
    pub request: LeaveRequest,
    /// The employee who submitted it.
    pub employee: Employee,
    /// Date tenure is measured at. Defaults to today (UTC).
    #[serde(default)]
    pub evaluation_date: Option<NaiveDate>,
}
