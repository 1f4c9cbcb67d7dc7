//! Deduction totals.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DeductionBreakdown, EmployeeProfile, StatutoryDeductions};

/// The result of summing all deductions.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// The full deduction breakdown with its total.
    pub breakdown: DeductionBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Combines the employee's voluntary deductions with the statutory amounts.
///
/// Nothing is clamped: deductions larger than gross pay produce a negative
/// net salary downstream.
///
/// # Errors
///
/// Returns `CalculationError` when a total overflows.
pub fn sum_deductions(
    employee: &EmployeeProfile,
    statutory: &StatutoryDeductions,
    step_number: u32,
) -> EngineResult<DeductionsResult> {
    let voluntary = &employee.deductions;
    let voluntary_total = voluntary.total()?;
    let statutory_total = statutory.total()?;
    let total = voluntary_total
        .checked_add(statutory_total)
        .ok_or_else(|| EngineError::overflow("deduction total"))?;

    let breakdown = DeductionBreakdown {
        tax: voluntary.tax,
        insurance: voluntary.insurance,
        other: voluntary.other,
        cooperative_fund: voluntary.cooperative_fund,
        health_insurance: voluntary.health_insurance,
        loan_deduction: voluntary.loan_deduction,
        sss: statutory.sss,
        phil_health: statutory.phil_health,
        pag_ibig: statutory.pag_ibig,
        total,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions_total".to_string(),
        rule_name: "Deductions Total".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "voluntary_total": voluntary_total.normalize().to_string(),
            "statutory_total": statutory_total.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} voluntary + {} statutory = {}",
            voluntary_total.normalize(),
            statutory_total.normalize(),
            total.normalize()
        ),
    };

    Ok(DeductionsResult {
        breakdown,
        audit_step,
    })
}
