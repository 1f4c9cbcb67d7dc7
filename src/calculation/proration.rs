//! Attendance-based base salary proration.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceAggregate, AuditStep, EmployeeProfile};

/// The result of prorating the base salary.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// The base salary after proration.
    pub prorated_base: Decimal,
    /// Whether attendance data was used.
    pub prorated: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prorates the monthly base salary by days present over work days.
///
/// Without attendance, or when either `work_days` or `days_present` is
/// missing, the full base salary is returned. Otherwise work days are floored
/// at 1, days present are clamped into `0..=work_days`, and the result is
/// `base_salary × days_present / work_days`.
///
/// # Errors
///
/// Returns `CalculationError` when the intermediate product overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::prorate_base;
/// use payroll_engine::models::{AttendanceAggregate, EmployeeProfile};
/// use rust_decimal::Decimal;
///
/// let employee: EmployeeProfile = serde_json::from_str(r#"{
///     "id": "emp_001", "name": "Ana Reyes", "position": "Driver",
///     "department": "Transport", "base_salary": "16000", "religion": "katolik"
/// }"#).unwrap();
///
/// let attendance = AttendanceAggregate {
///     work_days: Some(Decimal::new(20, 0)),
///     days_present: Some(Decimal::new(10, 0)),
///     ..Default::default()
/// };
///
/// let result = prorate_base(&employee, Some(&attendance), 1).unwrap();
/// assert_eq!(result.prorated_base, Decimal::new(8000, 0));
/// ```
pub fn prorate_base(
    employee: &EmployeeProfile,
    attendance: Option<&AttendanceAggregate>,
    step_number: u32,
) -> EngineResult<ProrationResult> {
    let base = employee.base_salary;
    let counts = attendance.and_then(|a| a.work_days.zip(a.days_present));

    let Some((work_days, days_present)) = counts else {
        return Ok(ProrationResult {
            prorated_base: base,
            prorated: false,
            audit_step: AuditStep {
                step_number,
                rule_id: "base_proration".to_string(),
                rule_name: "Base Salary Proration".to_string(),
                input: serde_json::json!({
                    "employee_id": employee.id,
                    "base_salary": base.normalize().to_string(),
                    "attendance_supplied": attendance.is_some()
                }),
                output: serde_json::json!({
                    "prorated": false,
                    "prorated_base": base.normalize().to_string()
                }),
                reasoning: "No attendance counts - full base salary".to_string(),
            },
        });
    };

    let work_days_used = work_days.max(Decimal::ONE);
    let days_present_used = days_present.max(Decimal::ZERO).min(work_days_used);
    let prorated_base = base
        .checked_mul(days_present_used)
        .and_then(|product| product.checked_div(work_days_used))
        .ok_or_else(|| EngineError::overflow("prorated base"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_proration".to_string(),
        rule_name: "Base Salary Proration".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "base_salary": base.normalize().to_string(),
            "work_days": work_days.normalize().to_string(),
            "days_present": days_present.normalize().to_string()
        }),
        output: serde_json::json!({
            "prorated": true,
            "work_days_used": work_days_used.normalize().to_string(),
            "days_present_used": days_present_used.normalize().to_string(),
            "prorated_base": prorated_base.normalize().to_string()
        }),
        reasoning: format!(
            "{} × {} / {} = {}",
            base.normalize(),
            days_present_used.normalize(),
            work_days_used.normalize(),
            prorated_base.normalize()
        ),
    };

    Ok(ProrationResult {
        prorated_base,
        prorated: true,
        audit_step,
    })
}
