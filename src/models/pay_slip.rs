//! Pay slip models for the Payroll Engine.
//!
//! This module contains the [`PaySlip`] type and its breakdown structures,
//! plus the audit trace types that record every decision made while the
//! slip was assembled.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::{checked_sum, HolidayType};

/// Allowance components of a pay slip.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AllowanceBreakdown;
/// use rust_decimal::Decimal;
///
/// let allowances = AllowanceBreakdown::new(
///     Decimal::new(1500, 0), // transport
///     Decimal::new(1000, 0), // meal
///     Decimal::ZERO,         // bonus
///     Decimal::new(625, 0),  // overtime
///     Decimal::ZERO,         // tips
///     Decimal::ZERO,         // holiday allowance
/// ).unwrap();
/// assert_eq!(allowances.total, Decimal::new(3125, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// Transport allowance.
    pub transport: Decimal,
    /// Meal allowance.
    pub meal: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Seeded tips plus any pool share.
    pub tips: Decimal,
    /// Seeded holiday allowance plus any holiday entitlement.
    pub holiday_allowance: Decimal,
    /// Sum of all of the above.
    pub total: Decimal,
}

impl AllowanceBreakdown {
    /// Builds the breakdown, computing the total from the components.
    ///
    /// # Errors
    ///
    /// Returns `CalculationError` when the total does not fit in a `Decimal`.
    pub fn new(
        transport: Decimal,
        meal: Decimal,
        bonus: Decimal,
        overtime: Decimal,
        tips: Decimal,
        holiday_allowance: Decimal,
    ) -> EngineResult<Self> {
        let total = checked_sum(
            "allowance total",
            [transport, meal, bonus, tips, holiday_allowance, overtime],
        )?;
        Ok(Self {
            transport,
            meal,
            bonus,
            overtime,
            tips,
            holiday_allowance,
            total,
        })
    }

    /// Re-sums the components. Equal to `total` for any breakdown built with [`Self::new`].
    pub fn components_sum(&self) -> EngineResult<Decimal> {
        checked_sum(
            "allowance total",
            [
                self.transport,
                self.meal,
                self.bonus,
                self.tips,
                self.holiday_allowance,
                self.overtime,
            ],
        )
    }
}

/// Statutory contributions for one pay slip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryDeductions {
    /// Social Security System contribution.
    pub sss: Decimal,
    /// PhilHealth premium.
    pub phil_health: Decimal,
    /// Pag-IBIG fund contribution.
    pub pag_ibig: Decimal,
}

impl StatutoryDeductions {
    /// Returns the sum of the three schemes.
    pub fn total(&self) -> EngineResult<Decimal> {
        checked_sum("statutory total", [self.sss, self.phil_health, self.pag_ibig])
    }
}

/// Deduction components of a pay slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Withholding tax.
    pub tax: Decimal,
    /// Insurance premium.
    pub insurance: Decimal,
    /// Other deductions.
    pub other: Decimal,
    /// Cooperative fund contribution.
    pub cooperative_fund: Decimal,
    /// Private health insurance.
    pub health_insurance: Decimal,
    /// Loan repayment.
    pub loan_deduction: Decimal,
    /// SSS contribution.
    pub sss: Decimal,
    /// PhilHealth premium.
    pub phil_health: Decimal,
    /// Pag-IBIG contribution.
    pub pag_ibig: Decimal,
    /// Sum of all of the above.
    pub total: Decimal,
}

impl DeductionBreakdown {
    /// Re-sums the components.
    pub fn components_sum(&self) -> EngineResult<Decimal> {
        checked_sum(
            "deduction total",
            [
                self.tax,
                self.insurance,
                self.other,
                self.cooperative_fund,
                self.health_insurance,
                self.loan_deduction,
                self.sss,
                self.phil_health,
                self.pag_ibig,
            ],
        )
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results a reviewer should look at, such as a negative net
/// salary, without failing the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The pay slip produced for one employee and one pay period.
///
/// Consumers (PDF rendering, notifications, reports) treat every field as
/// read-only and never recompute the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySlip {
    /// `PS-{employee_id}-{period without '/'}`.
    pub id: String,
    /// The employee the slip belongs to.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The `"month/year"` period token.
    pub period: String,
    /// Nominal monthly base salary.
    pub base_salary: Decimal,
    /// Base salary after attendance proration.
    pub prorated_base: Decimal,
    /// Allowance components.
    pub allowances: AllowanceBreakdown,
    /// Deduction components.
    pub deductions: DeductionBreakdown,
    /// Prorated base plus all allowances.
    pub gross_salary: Decimal,
    /// Gross salary minus all deductions. May be negative.
    pub net_salary: Decimal,
    /// Overtime hours paid on this slip.
    pub overtime_hours: Decimal,
    /// Type of the holiday whose allowance was paid, if any.
    pub holiday_type: Option<HolidayType>,
    /// When the slip was computed.
    pub generated_at: DateTime<Utc>,
    /// Every calculation decision behind the slip.
    pub audit_trace: AuditTrace,
}

impl PaySlip {
    /// Builds the pay slip id from an employee id and a compact period token.
    ///
    /// ```
    /// use payroll_engine::models::PaySlip;
    ///
    /// assert_eq!(PaySlip::slip_id("emp_001", "9/2025"), "PS-emp_001-92025");
    /// ```
    pub fn slip_id(employee_id: &str, period: &str) -> String {
        format!("PS-{}-{}", employee_id, period.replace('/', ""))
    }

    /// Returns true when deductions exceed gross pay.
    pub fn has_negative_net(&self) -> bool {
        self.net_salary < Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_deductions() -> DeductionBreakdown {
        DeductionBreakdown {
            tax: dec("500"),
            insurance: dec("200"),
            other: dec("0"),
            cooperative_fund: dec("100"),
            health_insurance: dec("0"),
            loan_deduction: dec("250"),
            sss: dec("1350"),
            phil_health: dec("750"),
            pag_ibig: dec("100"),
            total: dec("3250"),
        }
    }

    fn sample_slip(net: Decimal) -> PaySlip {
        PaySlip {
            id: PaySlip::slip_id("emp_001", "9/2025"),
            employee_id: "emp_001".to_string(),
            employee_name: "Juan Dela Cruz".to_string(),
            period: "9/2025".to_string(),
            base_salary: dec("30000"),
            prorated_base: dec("30000"),
            allowances: AllowanceBreakdown::new(
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
            )
            .unwrap(),
            deductions: sample_deductions(),
            gross_salary: dec("30000"),
            net_salary: net,
            overtime_hours: Decimal::ZERO,
            holiday_type: None,
            generated_at: DateTime::parse_from_rfc3339("2025-09-30T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            audit_trace: AuditTrace::default(),
        }
    }

    /// PSM-001: allowance total equals the sum of components
    #[test]
    fn test_allowance_total_equals_components() {
        let allowances = AllowanceBreakdown::new(
            dec("1500"),
            dec("1000"),
            dec("2000"),
            dec("625"),
            dec("750000"),
            dec("4000"),
        )
        .unwrap();
        assert_eq!(allowances.total, dec("759125"));
        assert_eq!(allowances.total, allowances.components_sum().unwrap());
    }

    #[test]
    fn test_deduction_components_sum() {
        let deductions = sample_deductions();
        assert_eq!(deductions.components_sum().unwrap(), deductions.total);
    }

    #[test]
    fn test_statutory_total() {
        let statutory = StatutoryDeductions {
            sss: dec("1350"),
            phil_health: dec("750"),
            pag_ibig: dec("100"),
        };
        assert_eq!(statutory.total().unwrap(), dec("2200"));
    }

    #[test]
    fn test_allowance_total_overflow_is_an_error() {
        let result = AllowanceBreakdown::new(
            Decimal::MAX,
            dec("1"),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert!(matches!(
            result,
            Err(crate::error::EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_slip_id_strips_every_slash() {
        assert_eq!(PaySlip::slip_id("E7", "12/2025"), "PS-E7-122025");
        assert_eq!(PaySlip::slip_id("E7", "1/1/2025"), "PS-E7-112025");
    }

    #[test]
    fn test_negative_net_detection() {
        assert!(sample_slip(dec("-10")).has_negative_net());
        assert!(!sample_slip(dec("0")).has_negative_net());
    }

    #[test]
    fn test_pay_slip_serialization() {
        let slip = sample_slip(dec("26750"));
        let json = serde_json::to_string(&slip).unwrap();
        assert!(json.contains("\"id\":\"PS-emp_001-92025\""));
        assert!(json.contains("\"period\":\"9/2025\""));
        assert!(json.contains("\"net_salary\":\"26750\""));
        assert!(json.contains("\"holiday_type\":null"));
        assert!(json.contains("\"phil_health\":\"750\""));
        assert!(json.contains("\"audit_trace\":{"));
    }

    #[test]
    fn test_pay_slip_deserialization_round_trip() {
        let slip = sample_slip(dec("26750"));
        let json = serde_json::to_string(&slip).unwrap();
        let parsed: PaySlip = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slip);
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "NEGATIVE_NET_SALARY".to_string(),
            message: "Deductions exceed gross salary".to_string(),
            severity: "high".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"NEGATIVE_NET_SALARY\""));
        assert!(json.contains("\"severity\":\"high\""));
    }
}
