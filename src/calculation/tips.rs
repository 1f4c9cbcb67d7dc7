//! Tip pool distribution.
//!
//! Eligible non-management roles receive an equal share of a monthly tip
//! pool. The pool itself comes from a [`TipPoolSource`], so a ledger-backed
//! source can replace the simulated one without touching the calculation.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::TipPoolConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmployeeProfile, PayPeriod};

/// Resolution of the simulated variation factor.
const VARIATION_SCALE: u32 = 6;

/// A tip pool for one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipPool {
    /// Total tips collected in the period.
    pub total: Decimal,
    /// Number of employees the pool is shared between.
    pub eligible_headcount: u32,
}

impl TipPool {
    /// Returns `round(total / headcount)`, half away from zero, or zero when
    /// the headcount is zero.
    ///
    /// ```
    /// use payroll_engine::calculation::TipPool;
    /// use rust_decimal::Decimal;
    ///
    /// let pool = TipPool { total: Decimal::new(15_000_010, 0), eligible_headcount: 20 };
    /// assert_eq!(pool.share(), Decimal::new(750_001, 0));
    ///
    /// let empty = TipPool { total: Decimal::new(1000, 0), eligible_headcount: 0 };
    /// assert_eq!(empty.share(), Decimal::ZERO);
    /// ```
    pub fn share(&self) -> Decimal {
        if self.eligible_headcount == 0 {
            return Decimal::ZERO;
        }
        (self.total / Decimal::from(self.eligible_headcount))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Supplies the tip pool for a pay period.
pub trait TipPoolSource: Send + Sync {
    /// Returns the pool for the given period.
    fn pool_for_period(&self, period: &PayPeriod) -> EngineResult<TipPool>;
}

/// A simulated tip pool: a nominal total varied uniformly by up to
/// `±variation` on every draw.
///
/// Draws are non-deterministic unless the source is created with
/// [`SimulatedTipPool::with_seed`].
#[derive(Debug)]
pub struct SimulatedTipPool {
    base_amount: Decimal,
    variation: Decimal,
    eligible_headcount: u32,
    rng: Mutex<StdRng>,
}

impl SimulatedTipPool {
    /// Creates a simulated pool seeded from system entropy.
    pub fn new(config: &TipPoolConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a simulated pool with a fixed seed, for reproducible draws.
    pub fn with_seed(config: &TipPoolConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &TipPoolConfig, rng: StdRng) -> Self {
        Self {
            base_amount: config.base_amount,
            variation: config.variation.abs(),
            eligible_headcount: config.eligible_headcount,
            rng: Mutex::new(rng),
        }
    }
}

impl TipPoolSource for SimulatedTipPool {
    fn pool_for_period(&self, _period: &PayPeriod) -> EngineResult<TipPool> {
        let bound = self
            .variation
            .checked_mul(Decimal::from(10i64.pow(VARIATION_SCALE)))
            .and_then(|scaled| scaled.trunc().to_i64())
            .unwrap_or(0);

        let drawn = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.gen_range(-bound..=bound)
        };

        let factor = Decimal::ONE + Decimal::new(drawn, VARIATION_SCALE);
        let total = self
            .base_amount
            .checked_mul(factor)
            .ok_or_else(|| EngineError::overflow("simulated tip pool"))?;
        Ok(TipPool {
            total,
            eligible_headcount: self.eligible_headcount,
        })
    }
}

/// A tip pool that returns the same figures for every period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTipPool {
    pool: TipPool,
}

impl FixedTipPool {
    /// Creates a fixed pool.
    pub fn new(total: Decimal, eligible_headcount: u32) -> Self {
        Self {
            pool: TipPool {
                total,
                eligible_headcount,
            },
        }
    }
}

impl TipPoolSource for FixedTipPool {
    fn pool_for_period(&self, _period: &PayPeriod) -> EngineResult<TipPool> {
        Ok(self.pool)
    }
}

/// The result of tip distribution for one employee.
#[derive(Debug, Clone)]
pub struct TipDistributionResult {
    /// Seeded tips plus any pool share.
    pub amount: Decimal,
    /// The pool share added, zero when not eligible.
    pub pool_share: Decimal,
    /// Whether the employee qualified for a pool share.
    pub eligible: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the first configured role contained in the lower-cased position.
fn matching_role<'a>(position: &str, eligible_positions: &'a [String]) -> Option<&'a str> {
    let position = position.to_lowercase();
    eligible_positions
        .iter()
        .map(String::as_str)
        .find(|role| position.contains(&role.to_lowercase()))
}

/// Adds a tip pool share to the employee's seeded tips when eligible.
///
/// Management never receives a share. Other employees qualify when their
/// position contains one of the configured eligible roles. The source is only
/// consulted for eligible employees.
///
/// # Errors
///
/// Propagates errors from the pool source, and returns `CalculationError`
/// when the seeded tips plus the share overflow.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{maybe_distribute_tips, FixedTipPool};
/// use payroll_engine::config::TipPoolConfig;
/// use payroll_engine::models::{EmployeeProfile, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let employee: EmployeeProfile = serde_json::from_str(r#"{
///     "id": "emp_007", "name": "Ramon Cruz", "position": "Senior Dive Master",
///     "base_salary": "20000", "religion": "katolik"
/// }"#).unwrap();
///
/// let source = FixedTipPool::new(Decimal::new(15_000_000, 0), 20);
/// let period = PayPeriod::parse("9/2025").unwrap();
///
/// let result =
///     maybe_distribute_tips(&employee, &period, &source, &TipPoolConfig::default(), 1).unwrap();
/// assert!(result.eligible);
/// assert_eq!(result.amount, Decimal::new(750_000, 0));
/// ```
pub fn maybe_distribute_tips(
    employee: &EmployeeProfile,
    period: &PayPeriod,
    source: &dyn TipPoolSource,
    config: &TipPoolConfig,
    step_number: u32,
) -> EngineResult<TipDistributionResult> {
    let seeded = employee.allowances.tips;
    let role = if employee.is_management {
        None
    } else {
        matching_role(&employee.position, &config.eligible_positions)
    };

    let Some(role) = role else {
        let reasoning = if employee.is_management {
            "Management is excluded from the tip pool".to_string()
        } else {
            format!("Position '{}' is not tip-eligible", employee.position)
        };
        return Ok(TipDistributionResult {
            amount: seeded,
            pool_share: Decimal::ZERO,
            eligible: false,
            audit_step: AuditStep {
                step_number,
                rule_id: "tip_pool".to_string(),
                rule_name: "Tip Pool Share".to_string(),
                input: serde_json::json!({
                    "employee_id": employee.id,
                    "position": employee.position,
                    "is_management": employee.is_management,
                    "seeded_tips": seeded.normalize().to_string()
                }),
                output: serde_json::json!({
                    "eligible": false,
                    "amount": seeded.normalize().to_string()
                }),
                reasoning,
            },
        });
    };

    let pool = source.pool_for_period(period)?;
    let pool_share = pool.share();
    let amount = seeded
        .checked_add(pool_share)
        .ok_or_else(|| EngineError::overflow("tips"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "tip_pool".to_string(),
        rule_name: "Tip Pool Share".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "position": employee.position,
            "matched_role": role,
            "period": period.to_string(),
            "pool_total": pool.total.normalize().to_string(),
            "eligible_headcount": pool.eligible_headcount,
            "seeded_tips": seeded.normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": true,
            "pool_share": pool_share.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "round({} / {}) = {} added to seeded {}",
            pool.total.normalize(),
            pool.eligible_headcount,
            pool_share.normalize(),
            seeded.normalize()
        ),
    };

    Ok(TipDistributionResult {
        amount,
        pool_share,
        eligible: true,
        audit_step,
    })
}
