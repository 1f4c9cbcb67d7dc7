//! Calculation logic for the Payroll Engine.
//!
//! One module per rule: holiday resolution, base proration, overtime pay,
//! statutory deductions, deduction totals and tip distribution. Each rule
//! returns its value together with an [`AuditStep`](crate::models::AuditStep).
//! The `payroll` module assembles them into a pay slip, and `attendance`
//! turns daily records into the aggregate the assembler consumes.

mod attendance;
mod deductions;
mod holiday;
mod overtime;
mod payroll;
mod proration;
mod statutory;
mod tips;

pub use attendance::{AttendanceSummaryResult, count_work_days, summarize_attendance};
pub use deductions::{DeductionsResult, sum_deductions};
pub use holiday::{
    HolidayAllowanceResult, HolidayResolution, resolve_active_holiday, resolve_holiday_allowance,
};
pub use overtime::{OvertimePayResult, compute_overtime_pay};
pub use payroll::{
    BatchFailure, NEGATIVE_NET_SALARY, PayrollBatch, PayrollBatchEntry, PayrollBatchSummary,
    PayrollContext, calculate_payroll, calculate_payroll_batch, validate_employee,
};
pub use proration::{ProrationResult, prorate_base};
pub use statutory::{
    StatutoryDeductionsResult, compute_statutory_deductions, is_valid_pag_ibig_number,
    is_valid_phil_health_number, is_valid_sss_number,
};
pub use tips::{
    FixedTipPool, SimulatedTipPool, TipDistributionResult, TipPool, TipPoolSource,
    maybe_distribute_tips,
};
