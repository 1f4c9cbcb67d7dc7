//! Attendance models.
//!
//! Daily [`AttendanceRecord`]s are captured per employee; the payroll
//! computation consumes them only once they have been summarized into an
//! [`AttendanceAggregate`] for the pay period.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Hours in a standard working day.
pub const STANDARD_DAY_HOURS: i64 = 8;

/// Minutes of lateness tolerated before it is recorded.
pub const LATE_GRACE_MINUTES: i64 = 15;

/// Attendance totals for one employee over one pay period.
///
/// Every field is optional. When `work_days` or `days_present` is missing the
/// base salary is not prorated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceAggregate {
    /// Expected working days in the period, after holiday exclusion.
    pub work_days: Option<Decimal>,
    /// Days with a qualifying presence.
    pub days_present: Option<Decimal>,
    /// Overtime hours over the period.
    pub overtime_hours: Option<Decimal>,
    /// Expected hours in the period, the denominator of the hourly rate.
    pub expected_hours: Option<Decimal>,
}

/// The status of a daily attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee clocked in.
    Present,
    /// No clock events.
    Absent,
    /// Approved leave.
    OnLeave,
    /// Holiday.
    Holiday,
    /// Clocked out without a clock-in.
    Pending,
}

/// One day of attendance for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// Clock-in time.
    #[serde(default)]
    pub time_in: Option<NaiveDateTime>,
    /// Clock-out time.
    #[serde(default)]
    pub time_out: Option<NaiveDateTime>,
    /// Hours worked.
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Hours beyond the standard day.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Minutes late past the scheduled start (only beyond the grace period).
    #[serde(default)]
    pub late_minutes: i64,
    /// The record status.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Derives a daily record from clock-in/clock-out times.
    ///
    /// The scheduled start is 09:00 on the record date. With both times the
    /// record is `Present`, worked hours are rounded to two decimal places and
    /// anything beyond eight hours counts as overtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::{NaiveDate, NaiveDateTime};
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
    /// let time_in = NaiveDateTime::parse_from_str("2025-09-02 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let time_out = NaiveDateTime::parse_from_str("2025-09-02 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let record = AttendanceRecord::from_clock("emp_001", date, Some(time_in), Some(time_out));
    /// assert_eq!(record.status, AttendanceStatus::Present);
    /// assert_eq!(record.hours_worked, Decimal::new(95, 1));
    /// assert_eq!(record.overtime_hours, Decimal::new(15, 1));
    /// assert_eq!(record.late_minutes, 30);
    /// ```
    pub fn from_clock(
        employee_id: impl Into<String>,
        date: NaiveDate,
        time_in: Option<NaiveDateTime>,
        time_out: Option<NaiveDateTime>,
    ) -> Self {
        let mut record = AttendanceRecord {
            employee_id: employee_id.into(),
            date,
            time_in,
            time_out,
            hours_worked: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            late_minutes: 0,
            status: AttendanceStatus::Absent,
        };

        match (time_in, time_out) {
            (Some(clock_in), Some(clock_out)) => {
                let worked_seconds = (clock_out - clock_in).num_seconds().max(0);
                let hours = Decimal::from(worked_seconds) / Decimal::from(3600);
                let standard = Decimal::from(STANDARD_DAY_HOURS);
                let overtime = if hours > standard {
                    hours - standard
                } else {
                    Decimal::ZERO
                };

                let scheduled_start = date.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default());
                let late_seconds = (clock_in - scheduled_start).num_seconds().max(0);
                let late = (late_seconds + 30) / 60;

                record.hours_worked = round_hours(hours);
                record.overtime_hours = round_hours(overtime);
                record.late_minutes = if late > LATE_GRACE_MINUTES { late } else { 0 };
                record.status = AttendanceStatus::Present;
            }
            (Some(_), None) => record.status = AttendanceStatus::Present,
            (None, Some(_)) => record.status = AttendanceStatus::Pending,
            (None, None) => {}
        }

        record
    }

    /// Returns true when the record counts towards days present.
    pub fn counts_as_present(&self) -> bool {
        self.status == AttendanceStatus::Present || self.hours_worked > Decimal::ZERO
    }
}

/// Rounds an hour quantity to two decimal places, half away from zero.
pub(crate) fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
