//! HTTP request handlers for the Leave Adjudication Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;

use super::request::EvaluateRequest;
use super::response::{ApiError, ApiErrorResponse, EvaluationResponse, EvaluationStatusResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/evaluate", post(evaluate_handler))
        .route("/evaluations/:request_id", get(evaluation_status_handler))
        .with_state(state)
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, json!({ "status": "ok" }))
}

/// Handler for POST /evaluate endpoint.
///
/// Adjudicates one leave request and returns the decision with the facts and
/// audit trace behind it.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluation request");

    let EvaluateRequest {
        request,
        employee,
        evaluation_date,
    } = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let evaluation_date = evaluation_date.unwrap_or_else(|| Utc::now().date_naive());

    // The request id keys the registry, so it must be usable before anything else.
    if let Err(err) = request.validate() {
        return engine_error_response(correlation_id, err);
    }

    let guard = match state.evaluations().begin(&request.id) {
        Ok(guard) => guard,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    match state
        .adjudicator()
        .evaluate_with_trace(&request, &employee, evaluation_date)
        .await
    {
        Ok(adjudication) => {
            guard.complete(adjudication.decision.clone());
            info!(
                correlation_id = %correlation_id,
                request_id = %request.id,
                employee_id = %employee.id,
                status = %adjudication.decision.status,
                duration_ms = adjudication.audit_trace.duration_us / 1000,
                "Evaluation completed successfully"
            );
            json_response(StatusCode::OK, EvaluationResponse::from(adjudication))
        }
        Err(err) => {
            guard.fail(&err);
            engine_error_response(correlation_id, err)
        }
    }
}

/// Handler for GET /evaluations/:request_id endpoint.
async fn evaluation_status_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Response {
    match state.evaluations().get(&request_id) {
        Some(evaluation) => json_response(
            StatusCode::OK,
            EvaluationStatusResponse::from(&evaluation),
        ),
        None => json_response(
            StatusCode::NOT_FOUND,
            ApiError::evaluation_not_found(&request_id),
        ),
    }
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        retryable = err.is_retryable(),
        "Evaluation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
