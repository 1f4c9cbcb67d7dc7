//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request bodies for the payroll and
//! attendance endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calculation::PayrollBatchEntry;
use crate::models::{
    AttendanceAggregate, AttendanceRecord, EmployeeProfile, HolidayDefinition,
    PublicHolidayFeedEntry,
};

/// Holiday data supplied with a request.
///
/// When `holidays` is present it replaces the configured calendar for the
/// call. Feed entries are converted to national holidays and appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayPoolRequest {
    /// A complete holiday pool for this call.
    #[serde(default)]
    pub holidays: Option<Vec<HolidayDefinition>>,
    /// Entries from a public holiday feed.
    #[serde(default)]
    pub public_holidays: Vec<PublicHolidayFeedEntry>,
}

impl HolidayPoolRequest {
    /// Builds the pool for a call, starting from `calendar` when no pool was supplied.
    pub fn into_pool(self, calendar: &[HolidayDefinition]) -> Vec<HolidayDefinition> {
        let mut pool = self.holidays.unwrap_or_else(|| calendar.to_vec());
        pool.extend(self.public_holidays.into_iter().map(Into::into));
        pool
    }
}

/// Request body for `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// The employee profile.
    pub employee: EmployeeProfile,
    /// The `"month/year"` period token.
    pub period: String,
    /// Attendance totals for the period, if known.
    #[serde(default)]
    pub attendance: Option<AttendanceAggregate>,
    /// Holiday data for the call.
    #[serde(flatten)]
    pub holiday_pool: HolidayPoolRequest,
}

/// Request body for `POST /payroll/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPayrollRequest {
    /// The `"month/year"` period token.
    pub period: String,
    /// The roster.
    pub entries: Vec<PayrollBatchEntry>,
    /// Holiday data for the call.
    #[serde(flatten)]
    pub holiday_pool: HolidayPoolRequest,
}

/// One day of clock events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockEntryRequest {
    /// The employee the entry belongs to.
    pub employee_id: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// Clock-in time.
    #[serde(default)]
    pub time_in: Option<NaiveDateTime>,
    /// Clock-out time.
    #[serde(default)]
    pub time_out: Option<NaiveDateTime>,
}

impl From<ClockEntryRequest> for AttendanceRecord {
    fn from(req: ClockEntryRequest) -> Self {
        AttendanceRecord::from_clock(req.employee_id, req.date, req.time_in, req.time_out)
    }
}

/// Request body for `POST /attendance/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSummaryRequest {
    /// The `"month/year"` period token.
    pub period: String,
    /// Daily clock entries for one employee.
    #[serde(default)]
    pub entries: Vec<ClockEntryRequest>,
    /// Holiday data for the call.
    #[serde(flatten)]
    pub holiday_pool: HolidayPoolRequest,
}
