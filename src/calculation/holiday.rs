//! Holiday resolution and holiday allowance calculation.
//!
//! A pay period pays at most one holiday allowance. This module picks the
//! active holiday for a period from a holiday pool and decides whether an
//! employee is eligible for its allowance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmployeeProfile, HolidayDefinition, HolidayType, PayPeriod};

/// How a single holiday is chosen when several are active in one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayResolution {
    /// The first active holiday in pool order.
    #[default]
    FirstActiveInPeriod,
    /// The active holiday with the largest allowance multiplier. The first
    /// one in pool order wins a tie.
    HighestMultiplier,
}

impl HolidayResolution {
    /// Returns the configuration name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayResolution::FirstActiveInPeriod => "first_active_in_period",
            HolidayResolution::HighestMultiplier => "highest_multiplier",
        }
    }
}

/// The result of resolving the holiday allowance for one employee.
#[derive(Debug, Clone)]
pub struct HolidayAllowanceResult {
    /// Seeded holiday allowance plus any holiday entitlement.
    pub amount: Decimal,
    /// Type of the holiday that was paid, if any.
    pub holiday_type: Option<HolidayType>,
    /// Id of the holiday that was paid, if any.
    pub holiday_id: Option<String>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the active holiday for a pay period.
///
/// Candidates are holidays with `is_active` set whose date falls in the
/// period's month and year.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{resolve_active_holiday, HolidayResolution};
/// use payroll_engine::models::{EligibleGroup, HolidayDefinition, HolidayType, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let pool = vec![HolidayDefinition {
///     id: "anniversary_2025".to_string(),
///     name: "Company Anniversary".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
///     holiday_type: HolidayType::Anniversary,
///     allowance_multiplier: Decimal::new(5, 1),
///     is_active: true,
///     eligible_religions: vec![EligibleGroup::All],
///     description: None,
///     local_name: None,
///     english_name: None,
/// }];
///
/// let september = PayPeriod::parse("9/2025").unwrap();
/// let october = PayPeriod::parse("10/2025").unwrap();
/// let strategy = HolidayResolution::FirstActiveInPeriod;
///
/// assert!(resolve_active_holiday(&september, &pool, strategy).is_some());
/// assert!(resolve_active_holiday(&october, &pool, strategy).is_none());
/// ```
pub fn resolve_active_holiday<'a>(
    period: &PayPeriod,
    pool: &'a [HolidayDefinition],
    strategy: HolidayResolution,
) -> Option<&'a HolidayDefinition> {
    let mut candidates = pool
        .iter()
        .filter(|h| h.is_active && period.contains(h.date));

    match strategy {
        HolidayResolution::FirstActiveInPeriod => candidates.next(),
        HolidayResolution::HighestMultiplier => candidates.fold(None, |best, h| match best {
            Some(b) if b.allowance_multiplier >= h.allowance_multiplier => Some(b),
            _ => Some(h),
        }),
    }
}

/// Resolves the holiday allowance for an employee in a pay period.
///
/// The seeded `holiday_allowance` from the employee profile is always kept.
/// When an active holiday exists and the employee's religion is admitted by
/// its eligibility list, `base_for_calculation × allowance_multiplier` is
/// added on top.
///
/// # Arguments
///
/// * `employee` - The employee profile
/// * `period` - The pay period
/// * `pool` - The authoritative holiday pool for this call
/// * `base_for_calculation` - The base the multiplier applies to (the prorated base)
/// * `strategy` - How to pick one holiday among several
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `CalculationError` when the entitlement or the total overflows.
pub fn resolve_holiday_allowance(
    employee: &EmployeeProfile,
    period: &PayPeriod,
    pool: &[HolidayDefinition],
    base_for_calculation: Decimal,
    strategy: HolidayResolution,
    step_number: u32,
) -> EngineResult<HolidayAllowanceResult> {
    let seeded = employee.allowances.holiday_allowance;

    let Some(holiday) = resolve_active_holiday(period, pool, strategy) else {
        return Ok(HolidayAllowanceResult {
            amount: seeded,
            holiday_type: None,
            holiday_id: None,
            audit_step: AuditStep {
                step_number,
                rule_id: "holiday_allowance".to_string(),
                rule_name: "Holiday Allowance".to_string(),
                input: serde_json::json!({
                    "employee_id": employee.id,
                    "period": period.to_string(),
                    "pool_size": pool.len(),
                    "strategy": strategy.as_str()
                }),
                output: serde_json::json!({
                    "holiday_id": null,
                    "eligible": false,
                    "amount": seeded.normalize().to_string()
                }),
                reasoning: format!("No active holiday in {}", period),
            },
        });
    };

    let eligible = holiday.is_eligible(employee.religion);
    let entitlement = if eligible {
        base_for_calculation
            .checked_mul(holiday.allowance_multiplier)
            .ok_or_else(|| EngineError::overflow("holiday entitlement"))?
    } else {
        Decimal::ZERO
    };
    let amount = seeded
        .checked_add(entitlement)
        .ok_or_else(|| EngineError::overflow("holiday allowance"))?;

    let reasoning = if eligible {
        format!(
            "{}: {} × {} = {} added to seeded {}",
            holiday.name,
            base_for_calculation.normalize(),
            holiday.allowance_multiplier.normalize(),
            entitlement.normalize(),
            seeded.normalize()
        )
    } else {
        format!(
            "{}: religion '{}' is not eligible - seeded amount only",
            holiday.name,
            employee.religion.as_str()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "holiday_allowance".to_string(),
        rule_name: "Holiday Allowance".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "period": period.to_string(),
            "religion": employee.religion.as_str(),
            "base_for_calculation": base_for_calculation.normalize().to_string(),
            "strategy": strategy.as_str()
        }),
        output: serde_json::json!({
            "holiday_id": holiday.id,
            "holiday_type": holiday.holiday_type,
            "multiplier": holiday.allowance_multiplier.normalize().to_string(),
            "eligible": eligible,
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(HolidayAllowanceResult {
        amount,
        holiday_type: eligible.then_some(holiday.holiday_type),
        holiday_id: eligible.then(|| holiday.id.clone()),
        audit_step,
    })
}
