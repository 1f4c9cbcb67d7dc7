//! Statutory deductions (SSS, PhilHealth, Pag-IBIG).
//!
//! Each scheme is deducted only when the employee's member number has a
//! recognised shape. A missing or malformed number yields a zero deduction
//! for that scheme rather than an error.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::config::{SchemeRate, StatutoryRates};
use crate::error::EngineResult;
use crate::models::{AuditStep, EmployeeProfile, StatutoryDeductions};

/// `NN-NNNNNNN-N` or ten digits.
static SSS_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}-[0-9]{7}-[0-9]|[0-9]{10})$").expect("invalid SSS pattern")
});

/// `NN-NNNNNNNNN-N` or twelve digits.
static PHIL_HEALTH_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}-[0-9]{9}-[0-9]|[0-9]{12})$").expect("invalid PhilHealth pattern")
});

/// `NNNN-NNNN-NNNN` or twelve digits.
static PAG_IBIG_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{4}-[0-9]{4}|[0-9]{12})$").expect("invalid Pag-IBIG pattern")
});

/// The result of computing statutory deductions.
#[derive(Debug, Clone)]
pub struct StatutoryDeductionsResult {
    /// The three scheme amounts.
    pub deductions: StatutoryDeductions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn matches_pattern(pattern: &Regex, value: Option<&str>) -> bool {
    value.is_some_and(|v| pattern.is_match(v.trim()))
}

/// Returns true for an SSS number shaped `NN-NNNNNNN-N` or ten digits.
///
/// ```
/// use payroll_engine::calculation::is_valid_sss_number;
///
/// assert!(is_valid_sss_number(" 34-1234567-8 "));
/// assert!(is_valid_sss_number("3412345678"));
/// assert!(!is_valid_sss_number("34-123456-78"));
/// ```
pub fn is_valid_sss_number(value: &str) -> bool {
    matches_pattern(&SSS_NUMBER, Some(value))
}

/// Returns true for a PhilHealth number shaped `NN-NNNNNNNNN-N` or twelve digits.
pub fn is_valid_phil_health_number(value: &str) -> bool {
    matches_pattern(&PHIL_HEALTH_NUMBER, Some(value))
}

/// Returns true for a Pag-IBIG number shaped `NNNN-NNNN-NNNN` or twelve digits.
pub fn is_valid_pag_ibig_number(value: &str) -> bool {
    matches_pattern(&PAG_IBIG_NUMBER, Some(value))
}

fn scheme_amount(valid: bool, rate: &SchemeRate, gross: Decimal) -> EngineResult<Decimal> {
    if valid {
        rate.contribution(gross)
    } else {
        Ok(Decimal::ZERO)
    }
}

/// Computes SSS, PhilHealth and Pag-IBIG deductions from gross salary.
///
/// # Errors
///
/// Returns `CalculationError` when a contribution or their total overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_statutory_deductions;
/// use payroll_engine::config::StatutoryRates;
/// use payroll_engine::models::EmployeeProfile;
/// use rust_decimal::Decimal;
///
/// let employee: EmployeeProfile = serde_json::from_str(r#"{
///     "id": "emp_001", "name": "Ana Reyes", "base_salary": "30000",
///     "religion": "islam", "sss_number": "34-1234567-8"
/// }"#).unwrap();
///
/// let result = compute_statutory_deductions(
///     Decimal::new(30000, 0),
///     &employee,
///     &StatutoryRates::default(),
///     1,
/// ).unwrap();
/// assert_eq!(result.deductions.sss, Decimal::new(1350, 0));
/// assert_eq!(result.deductions.phil_health, Decimal::ZERO);
/// assert_eq!(result.deductions.pag_ibig, Decimal::ZERO);
/// ```
pub fn compute_statutory_deductions(
    gross: Decimal,
    employee: &EmployeeProfile,
    rates: &StatutoryRates,
    step_number: u32,
) -> EngineResult<StatutoryDeductionsResult> {
    let sss_valid = matches_pattern(&SSS_NUMBER, employee.sss_number.as_deref());
    let phil_health_valid =
        matches_pattern(&PHIL_HEALTH_NUMBER, employee.phil_health_number.as_deref());
    let pag_ibig_valid = matches_pattern(&PAG_IBIG_NUMBER, employee.pag_ibig_number.as_deref());

    let deductions = StatutoryDeductions {
        sss: scheme_amount(sss_valid, &rates.sss, gross)?,
        phil_health: scheme_amount(phil_health_valid, &rates.phil_health, gross)?,
        pag_ibig: scheme_amount(pag_ibig_valid, &rates.pag_ibig, gross)?,
    };
    let total = deductions.total()?;

    let skipped: Vec<&str> = [
        ("SSS", sss_valid),
        ("PhilHealth", phil_health_valid),
        ("Pag-IBIG", pag_ibig_valid),
    ]
    .iter()
    .filter(|(_, valid)| !valid)
    .map(|(name, _)| *name)
    .collect();

    let reasoning = if skipped.is_empty() {
        format!(
            "All member numbers valid: {} total on gross {}",
            total.normalize(),
            gross.normalize()
        )
    } else {
        format!(
            "Missing or malformed member number for {} - not deducted",
            skipped.join(", ")
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "gross_salary": gross.normalize().to_string(),
            "sss_valid": sss_valid,
            "phil_health_valid": phil_health_valid,
            "pag_ibig_valid": pag_ibig_valid
        }),
        output: serde_json::json!({
            "sss": deductions.sss.normalize().to_string(),
            "phil_health": deductions.phil_health.normalize().to_string(),
            "pag_ibig": deductions.pag_ibig.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning,
    };

    Ok(StatutoryDeductionsResult {
        deductions,
        audit_step,
    })
}
