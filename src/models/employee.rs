//! Employee profile and related types.
//!
//! This module defines the [`EmployeeProfile`] struct together with the
//! fixed allowance and deduction bags that feed the payroll computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::checked_sum;

/// The religious group an employee belongs to, used for holiday eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Religion {
    /// Islam.
    Islam,
    /// Protestant Christianity.
    Kristen,
    /// Catholicism.
    Katolik,
    /// Hinduism.
    Hindu,
    /// Buddhism.
    Budha,
    /// Any other group.
    Other,
}

impl Religion {
    /// Returns the snake_case token used in holiday eligibility lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            Religion::Islam => "islam",
            Religion::Kristen => "kristen",
            Religion::Katolik => "katolik",
            Religion::Hindu => "hindu",
            Religion::Budha => "budha",
            Religion::Other => "other",
        }
    }
}

/// Fixed monthly allowance amounts.
///
/// Every field defaults to zero when absent from the source record, so the
/// calculation never has to deal with missing amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allowances {
    /// Transport allowance.
    pub transport: Decimal,
    /// Meal allowance.
    pub meal: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Seeded tips, added to any pool share.
    pub tips: Decimal,
    /// Seeded holiday allowance, added to any holiday entitlement.
    pub holiday_allowance: Decimal,
}

/// Fixed monthly voluntary deductions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
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
}

impl Deductions {
    /// Returns the sum of all voluntary deductions.
    pub fn total(&self) -> EngineResult<Decimal> {
        checked_sum(
            "voluntary deductions",
            [
                self.tax,
                self.insurance,
                self.other,
                self.cooperative_fund,
                self.health_insurance,
                self.loan_deduction,
            ],
        )
    }
}

/// An employee's compensation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text position name (e.g. "Senior Dive Master").
    #[serde(default)]
    pub position: String,
    /// Department name.
    #[serde(default)]
    pub department: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Explicit overtime rate per hour. Derived from the base salary when absent.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Management staff are excluded from the tip pool.
    #[serde(default)]
    pub is_management: bool,
    /// Religious group for holiday allowance eligibility.
    pub religion: Religion,
    /// SSS member number.
    #[serde(default)]
    pub sss_number: Option<String>,
    /// PhilHealth member number.
    #[serde(default)]
    pub phil_health_number: Option<String>,
    /// Pag-IBIG member number.
    #[serde(default)]
    pub pag_ibig_number: Option<String>,
    /// Contact phone, used for pay slip notifications.
    #[serde(default)]
    pub phone: Option<String>,
    /// Fixed monthly allowances.
    #[serde(default)]
    pub allowances: Allowances,
    /// Fixed monthly voluntary deductions.
    #[serde(default)]
    pub deductions: Deductions,
}

impl EmployeeProfile {
    /// Returns the explicit overtime rate when it is set and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{EmployeeProfile, Religion};
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = EmployeeProfile {
    ///     id: "emp_001".to_string(),
    ///     name: "Maria Santos".to_string(),
    ///     position: "Driver".to_string(),
    ///     department: "Operations".to_string(),
    ///     base_salary: Decimal::new(16000, 0),
    ///     overtime_rate: Some(Decimal::ZERO),
    ///     is_management: false,
    ///     religion: Religion::Katolik,
    ///     sss_number: None,
    ///     phil_health_number: None,
    ///     pag_ibig_number: None,
    ///     phone: None,
    ///     allowances: Default::default(),
    ///     deductions: Default::default(),
    /// };
    /// assert_eq!(employee.explicit_overtime_rate(), None);
    ///
    /// employee.overtime_rate = Some(Decimal::new(150, 0));
    /// assert_eq!(employee.explicit_overtime_rate(), Some(Decimal::new(150, 0)));
    /// ```
    pub fn explicit_overtime_rate(&self) -> Option<Decimal> {
        self.overtime_rate.filter(|rate| *rate > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_employee_defaults_bags_to_zero() {
        let json = r#"{
            "id": "emp_001",
            "name": "Juan Dela Cruz",
            "base_salary": "30000",
            "religion": "islam"
        }"#;

        let employee: EmployeeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.base_salary, dec("30000"));
        assert_eq!(employee.religion, Religion::Islam);
        assert!(!employee.is_management);
        assert_eq!(employee.allowances, Allowances::default());
        assert_eq!(employee.deductions, Deductions::default());
        assert!(employee.sss_number.is_none());
    }

    #[test]
    fn test_deserialize_partial_allowance_bag() {
        let json = r#"{
            "id": "emp_002",
            "name": "Ana Reyes",
            "position": "Dive Master",
            "base_salary": "18000",
            "religion": "kristen",
            "allowances": { "transport": "1500", "tips": "200" },
            "deductions": { "loan_deduction": "750" }
        }"#;

        let employee: EmployeeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(employee.allowances.transport, dec("1500"));
        assert_eq!(employee.allowances.tips, dec("200"));
        assert_eq!(employee.allowances.meal, Decimal::ZERO);
        assert_eq!(employee.deductions.loan_deduction, dec("750"));
        assert_eq!(employee.deductions.tax, Decimal::ZERO);
    }

    #[test]
    fn test_deductions_total_sums_every_field() {
        let deductions = Deductions {
            tax: dec("100"),
            insurance: dec("50"),
            other: dec("25"),
            cooperative_fund: dec("10"),
            health_insurance: dec("5"),
            loan_deduction: dec("1"),
        };
        assert_eq!(deductions.total().unwrap(), dec("191"));
    }

    #[test]
    fn test_religion_serialization() {
        assert_eq!(
            serde_json::to_string(&Religion::Katolik).unwrap(),
            "\"katolik\""
        );
        let religion: Religion = serde_json::from_str("\"budha\"").unwrap();
        assert_eq!(religion, Religion::Budha);
        assert_eq!(Religion::Hindu.as_str(), "hindu");
    }

    #[test]
    fn test_unknown_religion_is_rejected() {
        let result: Result<Religion, _> = serde_json::from_str("\"all\"");
        assert!(result.is_err());
    }
}
