//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST endpoints for computing pay slips, running
//! a payroll batch and summarizing attendance.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceSummaryRequest, BatchPayrollRequest, CalculatePayrollRequest, ClockEntryRequest,
    HolidayPoolRequest,
};
pub use response::{ApiError, AttendanceSummaryResponse, PaySlipResponse};
pub use state::AppState;
