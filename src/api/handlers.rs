//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_payroll, calculate_payroll_batch, summarize_attendance, PayrollContext,
};
use crate::format::pay_slip_message;
use crate::models::{AttendanceRecord, PayPeriod};

use super::request::{AttendanceSummaryRequest, BatchPayrollRequest, CalculatePayrollRequest};
use super::response::{ApiError, ApiErrorResponse, AttendanceSummaryResponse, PaySlipResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/batch", post(batch_handler))
        .route("/attendance/summary", post(attendance_summary_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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

/// Handler for POST /payroll/calculate.
///
/// Computes one pay slip and returns it with its notification text.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let loader = state.config();
    let holidays = request.holiday_pool.into_pool(loader.holidays());
    let ctx = PayrollContext {
        config: loader.config(),
        holidays: &holidays,
        tip_source: state.tip_source(),
    };

    let start_time = Instant::now();
    match calculate_payroll(
        &request.employee,
        &request.period,
        request.attendance.as_ref(),
        &ctx,
    ) {
        Ok(slip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %slip.employee_id,
                period = %slip.period,
                net_salary = %slip.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculation completed successfully"
            );
            let notification = pay_slip_message(&slip, loader.formatting());
            json_response(StatusCode::OK, PaySlipResponse { slip, notification })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee.id,
                error = %err,
                "Payroll calculation rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /payroll/batch.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let loader = state.config();
    let holidays = request.holiday_pool.into_pool(loader.holidays());
    let ctx = PayrollContext {
        config: loader.config(),
        holidays: &holidays,
        tip_source: state.tip_source(),
    };

    let start_time = Instant::now();
    match calculate_payroll_batch(&request.entries, &request.period, &ctx) {
        Ok(batch) => {
            info!(
                correlation_id = %correlation_id,
                period = %batch.period,
                employee_count = batch.summary.employee_count,
                failures = batch.failures.len(),
                total_net = %batch.summary.total_net,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll batch completed"
            );
            json_response(StatusCode::OK, batch)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll batch rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /attendance/summary.
///
/// Derives daily records from clock entries and summarizes them for the
/// period.
async fn attendance_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let period = match PayPeriod::parse(&request.period) {
        Ok(period) => period,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Attendance summary rejected"
            );
            return error_response(err.into());
        }
    };

    let holidays = request.holiday_pool.into_pool(state.config().holidays());
    let records: Vec<AttendanceRecord> = request.entries.into_iter().map(Into::into).collect();
    let summary = match summarize_attendance(&records, &period, &holidays, 1) {
        Ok(summary) => summary,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Attendance summary failed"
            );
            return error_response(err.into());
        }
    };

    info!(
        correlation_id = %correlation_id,
        period = %period,
        records_in_period = summary.records_in_period,
        "Attendance summary completed"
    );

    json_response(
        StatusCode::OK,
        AttendanceSummaryResponse {
            period: period.to_string(),
            attendance: summary.aggregate,
            records_in_period: summary.records_in_period,
        },
    )
}
