//! HTTP API module for the Leave Adjudication Engine.
//!
//! This module provides the REST API endpoints for evaluating leave requests
//! and reading back their evaluation state.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::EvaluateRequest;
pub use response::{ApiError, EvaluationResponse, EvaluationStatusResponse};
pub use state::{AppState, EvaluationGuard, EvaluationRegistry};
