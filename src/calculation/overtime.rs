//! Overtime pay calculation.
//!
//! Overtime is paid per hour at the employee's explicit overtime rate when
//! one is set, otherwise at the hourly rate derived from the monthly base
//! salary multiplied by the configured overtime multiplier.

use rust_decimal::Decimal;

use crate::config::OvertimeConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceAggregate, AuditStep, EmployeeProfile};

/// The result of calculating overtime pay.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// Overtime hours paid, never negative.
    pub hours: Decimal,
    /// Hourly rate derived from the base salary.
    pub hourly_rate: Decimal,
    /// Rate applied per overtime hour.
    pub overtime_rate: Decimal,
    /// Whether the employee's explicit overtime rate was used.
    pub explicit_rate: bool,
    /// Overtime pay.
    pub pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates overtime pay from the attendance aggregate.
///
/// - `hours` = `overtime_hours`, or 0 when missing
/// - `expected` = `expected_hours`, or the configured default monthly hours
/// - `hourly` = `base_salary / expected`, or 0 when `expected` is not positive
/// - `rate` = explicit overtime rate when positive, else `hourly × multiplier`
/// - `pay` = `max(0, hours) × rate`
///
/// # Errors
///
/// Returns `CalculationError` when the rate or the pay overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_overtime_pay;
/// use payroll_engine::config::OvertimeConfig;
/// use payroll_engine::models::{AttendanceAggregate, EmployeeProfile};
/// use rust_decimal::Decimal;
///
/// let employee: EmployeeProfile = serde_json::from_str(r#"{
///     "id": "emp_001", "name": "Ana Reyes", "base_salary": "16000", "religion": "islam"
/// }"#).unwrap();
///
/// let attendance = AttendanceAggregate {
///     overtime_hours: Some(Decimal::new(5, 0)),
///     expected_hours: Some(Decimal::new(160, 0)),
///     ..Default::default()
/// };
///
/// let result =
///     compute_overtime_pay(&employee, Some(&attendance), &OvertimeConfig::default(), 1).unwrap();
/// assert_eq!(result.overtime_rate, Decimal::new(125, 0));
/// assert_eq!(result.pay, Decimal::new(625, 0));
/// ```
pub fn compute_overtime_pay(
    employee: &EmployeeProfile,
    attendance: Option<&AttendanceAggregate>,
    config: &OvertimeConfig,
    step_number: u32,
) -> EngineResult<OvertimePayResult> {
    let raw_hours = attendance
        .and_then(|a| a.overtime_hours)
        .unwrap_or(Decimal::ZERO);
    let expected = attendance
        .and_then(|a| a.expected_hours)
        .unwrap_or(config.default_monthly_hours);

    let hourly_rate = if expected > Decimal::ZERO {
        employee
            .base_salary
            .checked_div(expected)
            .ok_or_else(|| EngineError::overflow("hourly rate"))?
    } else {
        Decimal::ZERO
    };

    let (overtime_rate, explicit_rate) = match employee.explicit_overtime_rate() {
        Some(rate) => (rate, true),
        None => (
            hourly_rate
                .checked_mul(config.multiplier)
                .ok_or_else(|| EngineError::overflow("overtime rate"))?,
            false,
        ),
    };

    let hours = raw_hours.max(Decimal::ZERO);
    let pay = hours
        .checked_mul(overtime_rate)
        .ok_or_else(|| EngineError::overflow("overtime pay"))?;

    let reasoning = if explicit_rate {
        format!(
            "{} hours × explicit rate {} = {}",
            hours.normalize(),
            overtime_rate.normalize(),
            pay.normalize()
        )
    } else {
        format!(
            "{} hours × ({} / {} × {}) = {}",
            hours.normalize(),
            employee.base_salary.normalize(),
            expected.normalize(),
            config.multiplier.normalize(),
            pay.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "base_salary": employee.base_salary.normalize().to_string(),
            "overtime_hours": raw_hours.normalize().to_string(),
            "expected_hours": expected.normalize().to_string(),
            "multiplier": config.multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "overtime_rate": overtime_rate.normalize().to_string(),
            "explicit_rate": explicit_rate,
            "pay": pay.normalize().to_string()
        }),
        reasoning,
    };

    Ok(OvertimePayResult {
        hours,
        hourly_rate,
        overtime_rate,
        explicit_rate,
        pay,
        audit_step,
    })
}
