//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every structure also has
//! a `Default` carrying the 2025 Philippine rates, so the engine can run
//! without any files on disk.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::HolidayResolution;
use crate::error::{EngineError, EngineResult};
use crate::models::HolidayDefinition;

/// Overtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeConfig {
    /// Multiplier applied to the derived hourly rate (e.g. 1.25).
    pub multiplier: Decimal,
    /// Hours assumed per month when no attendance is supplied.
    pub default_monthly_hours: Decimal,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            multiplier: Decimal::new(125, 2),
            default_monthly_hours: Decimal::new(160, 0),
        }
    }
}

/// Rate definition for one statutory contribution scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRate {
    /// Employee share as a fraction of the contribution base.
    pub rate: Decimal,
    /// The contribution base is capped at this salary, if set.
    #[serde(default)]
    pub salary_ceiling: Option<Decimal>,
    /// The contribution itself is capped at this amount, if set.
    #[serde(default)]
    pub max_contribution: Option<Decimal>,
}

impl SchemeRate {
    /// Applies the ceiling, the rate and the cap to a gross amount.
    ///
    /// ```
    /// use payroll_engine::config::SchemeRate;
    /// use rust_decimal::Decimal;
    ///
    /// let pag_ibig = SchemeRate {
    ///     rate: Decimal::new(2, 2),
    ///     salary_ceiling: None,
    ///     max_contribution: Some(Decimal::new(100, 0)),
    /// };
    /// assert_eq!(pag_ibig.contribution(Decimal::new(3000, 0)).unwrap(), Decimal::new(60, 0));
    /// assert_eq!(pag_ibig.contribution(Decimal::new(30000, 0)).unwrap(), Decimal::new(100, 0));
    /// ```
    pub fn contribution(&self, gross: Decimal) -> EngineResult<Decimal> {
        let base = match self.salary_ceiling {
            Some(ceiling) => gross.min(ceiling),
            None => gross,
        };
        let amount = base
            .checked_mul(self.rate)
            .ok_or_else(|| EngineError::overflow("statutory contribution"))?;
        Ok(match self.max_contribution {
            Some(cap) => amount.min(cap),
            None => amount,
        })
    }
}

/// Statutory contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Social Security System.
    pub sss: SchemeRate,
    /// PhilHealth.
    pub phil_health: SchemeRate,
    /// Pag-IBIG fund.
    pub pag_ibig: SchemeRate,
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            sss: SchemeRate {
                rate: Decimal::new(45, 3),
                salary_ceiling: Some(Decimal::new(30_000, 0)),
                max_contribution: None,
            },
            phil_health: SchemeRate {
                rate: Decimal::new(25, 3),
                salary_ceiling: Some(Decimal::new(200_000, 0)),
                max_contribution: Some(Decimal::new(10_000, 0)),
            },
            pag_ibig: SchemeRate {
                rate: Decimal::new(2, 2),
                salary_ceiling: None,
                max_contribution: Some(Decimal::new(100, 0)),
            },
        }
    }
}

/// Tip pool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipPoolConfig {
    /// Nominal monthly pool total used by the simulated pool.
    pub base_amount: Decimal,
    /// Maximum relative variation of the simulated pool (0.15 = ±15%).
    pub variation: Decimal,
    /// Headcount the pool is divided by. Not derived from the roster.
    pub eligible_headcount: u32,
    /// Position fragments that qualify for a pool share (lower case).
    pub eligible_positions: Vec<String>,
}

impl Default for TipPoolConfig {
    fn default() -> Self {
        Self {
            base_amount: Decimal::new(15_000_000, 0),
            variation: Decimal::new(15, 2),
            eligible_headcount: 20,
            eligible_positions: [
                "dive master",
                "senior dive master",
                "driver",
                "senior driver",
                "diving instructor",
                "senior diving instructor",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Date layouts for formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// 30/09/2025
    DdMmYyyy,
    /// 09/30/2025
    MmDdYyyy,
    /// 2025-09-30
    YyyyMmDd,
    /// 30 September 2025
    Long,
}

/// How amounts are labelled with their currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyDisplay {
    /// ₱28,650
    #[default]
    Symbol,
    /// PHP 28,650
    Code,
}

/// Presentation settings passed explicitly to every formatting function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingConfig {
    /// Symbol printed before amounts.
    pub currency_symbol: String,
    /// ISO currency code.
    pub currency_code: String,
    /// Whether amounts carry the symbol or the code.
    #[serde(default)]
    pub currency_display: CurrencyDisplay,
    /// Digits after the decimal point.
    pub fraction_digits: u32,
    /// Thousands grouping separator.
    pub thousands_separator: String,
    /// Date layout.
    pub date_format: DateFormat,
    /// Company name used in notification text.
    pub company_name: String,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₱".to_string(),
            currency_code: "PHP".to_string(),
            currency_display: CurrencyDisplay::Symbol,
            fraction_digits: 0,
            thousands_separator: ",".to_string(),
            date_format: DateFormat::DdMmYyyy,
            company_name: "Enjoy Dive".to_string(),
        }
    }
}

/// The complete payroll configuration (payroll.yaml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Overtime settings.
    pub overtime: OvertimeConfig,
    /// Which holiday wins when several are active in one period.
    pub holiday_resolution: HolidayResolution,
    /// Statutory contribution rates.
    pub statutory: StatutoryRates,
    /// Tip pool settings.
    pub tip_pool: TipPoolConfig,
    /// Output formatting.
    pub formatting: FormattingConfig,
}

/// Holiday calendar file structure (holidays.yaml).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidayCalendarConfig {
    /// The default holiday pool.
    #[serde(default)]
    pub holidays: Vec<HolidayDefinition>,
}
