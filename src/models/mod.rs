//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

mod attendance;
mod employee;
mod holiday;
mod pay_period;
mod pay_slip;

pub use attendance::{
    AttendanceAggregate, AttendanceRecord, AttendanceStatus, LATE_GRACE_MINUTES,
    STANDARD_DAY_HOURS,
};
pub(crate) use attendance::round_hours;
pub use employee::{Allowances, Deductions, EmployeeProfile, Religion};
pub use holiday::{EligibleGroup, HolidayDefinition, HolidayType, PublicHolidayFeedEntry};
pub use pay_period::PayPeriod;
pub use pay_slip::{
    AllowanceBreakdown, AuditStep, AuditTrace, AuditWarning, DeductionBreakdown, PaySlip,
    StatutoryDeductions,
};

/// Adds up `parts`, failing with a labelled overflow error instead of panicking.
pub(crate) fn checked_sum(
    what: &str,
    parts: impl IntoIterator<Item = Decimal>,
) -> EngineResult<Decimal> {
    parts.into_iter().try_fold(Decimal::ZERO, |acc, part| {
        acc.checked_add(part).ok_or_else(|| EngineError::overflow(what))
    })
}
