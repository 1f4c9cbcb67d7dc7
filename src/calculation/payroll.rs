//! Pay slip assembly.
//!
//! [`calculate_payroll`] runs every rule for one employee and one period and
//! assembles the resulting [`PaySlip`]. [`calculate_payroll_batch`] does the
//! same for a roster and summarizes the results.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    checked_sum, AllowanceBreakdown, AttendanceAggregate, AuditStep, AuditTrace, AuditWarning,
    EmployeeProfile, HolidayDefinition, PayPeriod, PaySlip,
};

use super::deductions::sum_deductions;
use super::holiday::resolve_holiday_allowance;
use super::overtime::compute_overtime_pay;
use super::proration::prorate_base;
use super::statutory::compute_statutory_deductions;
use super::tips::{maybe_distribute_tips, TipPoolSource};

/// Warning code attached to slips whose deductions exceed gross pay.
pub const NEGATIVE_NET_SALARY: &str = "NEGATIVE_NET_SALARY";

/// Everything a payroll calculation reads besides the employee and period.
#[derive(Clone, Copy)]
pub struct PayrollContext<'a> {
    /// Rates and defaults.
    pub config: &'a PayrollConfig,
    /// The authoritative holiday pool for the calculation.
    pub holidays: &'a [HolidayDefinition],
    /// Where tip pools come from.
    pub tip_source: &'a dyn TipPoolSource,
}

/// Rejects employee profiles the calculation cannot work with.
///
/// Only an empty id and a negative base salary are rejected. Everything
/// else degrades to zero or passes through.
pub fn validate_employee(employee: &EmployeeProfile) -> EngineResult<()> {
    if employee.id.trim().is_empty() {
        return Err(EngineError::invalid_input(
            "employee.id",
            "employee id must not be empty",
        ));
    }
    if employee.base_salary < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "employee.base_salary",
            format!(
                "base salary must not be negative, got {}",
                employee.base_salary
            ),
        ));
    }
    Ok(())
}

fn negative_net_warning(employee_id: &str, net: Decimal) -> AuditWarning {
    AuditWarning {
        code: NEGATIVE_NET_SALARY.to_string(),
        message: format!(
            "Deductions exceed gross salary for {}: net {}",
            employee_id,
            net.normalize()
        ),
        severity: "high".to_string(),
    }
}

/// Calculates the pay slip for one employee and one pay period.
///
/// The steps run in a fixed order: overtime pay, prorated base, holiday
/// allowance on the prorated base, tips, allowance total, gross, statutory
/// deductions on gross, deduction total, net. Net salary is not clamped;
/// a negative net adds a `NEGATIVE_NET_SALARY` warning to the audit trace.
///
/// The slip's `period` is the caller's token with surrounding whitespace
/// removed, so `"09/2025"` yields the id `PS-emp_001-092025`.
///
/// # Errors
///
/// Returns `InvalidInput` for an unparseable period, a month outside
/// 1..=12, an empty employee id or a negative base salary. Returns
/// `CalculationError` when an amount overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_payroll, FixedTipPool, PayrollContext};
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::EmployeeProfile;
/// use rust_decimal::Decimal;
///
/// let employee: EmployeeProfile = serde_json::from_str(r#"{
///     "id": "emp_001", "name": "Jose Rizal", "position": "Accountant",
///     "base_salary": "30000", "religion": "katolik", "sss_number": "34-1234567-8"
/// }"#).unwrap();
///
/// let config = PayrollConfig::default();
/// let tips = FixedTipPool::new(Decimal::ZERO, 20);
/// let ctx = PayrollContext { config: &config, holidays: &[], tip_source: &tips };
///
/// let slip = calculate_payroll(&employee, "9/2025", None, &ctx).unwrap();
/// assert_eq!(slip.id, "PS-emp_001-92025");
/// assert_eq!(slip.gross_salary, Decimal::new(30000, 0));
/// assert_eq!(slip.deductions.sss, Decimal::new(1350, 0));
/// assert_eq!(slip.net_salary, Decimal::new(28650, 0));
/// ```
pub fn calculate_payroll(
    employee: &EmployeeProfile,
    period: &str,
    attendance: Option<&AttendanceAggregate>,
    ctx: &PayrollContext<'_>,
) -> EngineResult<PaySlip> {
    let start_time = Instant::now();
    let pay_period = PayPeriod::parse(period)?;
    validate_employee(employee)?;

    let config = ctx.config;
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let overtime = compute_overtime_pay(employee, attendance, &config.overtime, 1)?;
    steps.push(overtime.audit_step);

    let proration = prorate_base(employee, attendance, 2)?;
    let prorated_base = proration.prorated_base;
    steps.push(proration.audit_step);

    let holiday = resolve_holiday_allowance(
        employee,
        &pay_period,
        ctx.holidays,
        prorated_base,
        config.holiday_resolution,
        3,
    )?;
    steps.push(holiday.audit_step);

    let tips = maybe_distribute_tips(employee, &pay_period, ctx.tip_source, &config.tip_pool, 4)?;
    steps.push(tips.audit_step);

    let seeded = &employee.allowances;
    let allowances = AllowanceBreakdown::new(
        seeded.transport,
        seeded.meal,
        seeded.bonus,
        overtime.pay,
        tips.amount,
        holiday.amount,
    )?;

    let gross_salary = prorated_base
        .checked_add(allowances.total)
        .ok_or_else(|| EngineError::overflow("gross salary"))?;

    let statutory = compute_statutory_deductions(gross_salary, employee, &config.statutory, 5)?;
    steps.push(statutory.audit_step);

    let deductions = sum_deductions(employee, &statutory.deductions, 6)?;
    steps.push(deductions.audit_step);
    let deductions = deductions.breakdown;

    let net_salary = gross_salary
        .checked_sub(deductions.total)
        .ok_or_else(|| EngineError::overflow("net salary"))?;

    steps.push(AuditStep {
        step_number: 7,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "prorated_base": prorated_base.normalize().to_string(),
            "allowances_total": allowances.total.normalize().to_string(),
            "deductions_total": deductions.total.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "({} + {}) - {} = {}",
            prorated_base.normalize(),
            allowances.total.normalize(),
            deductions.total.normalize(),
            net_salary.normalize()
        ),
    });

    if net_salary < Decimal::ZERO {
        warn!(
            employee_id = %employee.id,
            period = %pay_period,
            net_salary = %net_salary,
            "Deductions exceed gross salary"
        );
        warnings.push(negative_net_warning(&employee.id, net_salary));
    }

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        employee_id = %employee.id,
        period = %pay_period,
        gross_salary = %gross_salary,
        net_salary = %net_salary,
        duration_us,
        "Pay slip computed"
    );

    let token = period.trim();
    Ok(PaySlip {
        id: PaySlip::slip_id(&employee.id, token),
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        period: token.to_string(),
        base_salary: employee.base_salary,
        prorated_base,
        allowances,
        deductions,
        gross_salary,
        net_salary,
        overtime_hours: overtime.hours,
        holiday_type: holiday.holiday_type,
        generated_at: Utc::now(),
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

/// One roster entry for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollBatchEntry {
    /// The employee profile.
    pub employee: EmployeeProfile,
    /// The employee's attendance aggregate, if known.
    #[serde(default)]
    pub attendance: Option<AttendanceAggregate>,
}

/// An employee whose pay slip could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee id as supplied.
    pub employee_id: String,
    /// Why the calculation was rejected.
    pub error: String,
}

/// Totals over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBatchSummary {
    /// Number of pay slips produced.
    pub employee_count: usize,
    /// Sum of gross salaries.
    pub total_gross: Decimal,
    /// Sum of net salaries.
    pub total_net: Decimal,
    /// One `NEGATIVE_NET_SALARY` warning per slip with a negative net.
    pub warnings: Vec<AuditWarning>,
}

/// The outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBatch {
    /// The period token as supplied, trimmed.
    pub period: String,
    /// Pay slips in roster order.
    pub slips: Vec<PaySlip>,
    /// Employees that were rejected.
    pub failures: Vec<BatchFailure>,
    /// Totals over `slips`.
    pub summary: PayrollBatchSummary,
}

/// Calculates pay slips for a whole roster for one period.
///
/// Each employee is calculated independently; a rejected employee is
/// recorded in `failures` and does not stop the batch. An invalid period
/// rejects the whole batch, as does an overflow in the batch totals.
pub fn calculate_payroll_batch(
    entries: &[PayrollBatchEntry],
    period: &str,
    ctx: &PayrollContext<'_>,
) -> EngineResult<PayrollBatch> {
    PayPeriod::parse(period)?;
    let token = period.trim().to_string();

    let mut slips = Vec::with_capacity(entries.len());
    let mut failures = Vec::new();
    let mut summary = PayrollBatchSummary::default();

    for entry in entries {
        match calculate_payroll(&entry.employee, &token, entry.attendance.as_ref(), ctx) {
            Ok(slip) => {
                summary.total_gross =
                    checked_sum("batch gross total", [summary.total_gross, slip.gross_salary])?;
                summary.total_net =
                    checked_sum("batch net total", [summary.total_net, slip.net_salary])?;
                if slip.has_negative_net() {
                    summary
                        .warnings
                        .push(negative_net_warning(&slip.employee_id, slip.net_salary));
                }
                slips.push(slip);
            }
            Err(err) => {
                warn!(
                    employee_id = %entry.employee.id,
                    period = %token,
                    error = %err,
                    "Pay slip rejected"
                );
                failures.push(BatchFailure {
                    employee_id: entry.employee.id.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    summary.employee_count = slips.len();
    debug!(
        period = %token,
        employee_count = summary.employee_count,
        failures = failures.len(),
        total_net = %summary.total_net,
        "Batch computed"
    );

    Ok(PayrollBatch {
        period: token,
        slips,
        failures,
        summary,
    })
}
