//! Currency, date and notification text formatting.
//!
//! Every function takes its [`FormattingConfig`] explicitly; there is no
//! process-wide currency or locale setting.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CurrencyDisplay, DateFormat, FormattingConfig};
use crate::models::{PayPeriod, PaySlip};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Inserts `separator` between every group of three digits.
fn group_thousands(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Formats an amount with the configured currency label, grouping and
/// precision.
///
/// Amounts are rounded half away from zero to `fraction_digits` places.
/// With [`CurrencyDisplay::Code`] the ISO code and a space replace the symbol.
///
/// ```
/// use payroll_engine::config::FormattingConfig;
/// use payroll_engine::format::format_currency;
/// use rust_decimal::Decimal;
///
/// let cfg = FormattingConfig::default();
/// assert_eq!(format_currency(Decimal::new(1_234_567, 0), &cfg), "₱1,234,567");
/// assert_eq!(format_currency(Decimal::new(-25005, 1), &cfg), "-₱2,501");
/// ```
pub fn format_currency(amount: Decimal, cfg: &FormattingConfig) -> String {
    let rounded = amount
        .round_dp_with_strategy(cfg.fraction_digits, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let negative = amount < Decimal::ZERO && !rounded.is_zero();

    let text = format!("{:.*}", cfg.fraction_digits as usize, rounded);
    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    match cfg.currency_display {
        CurrencyDisplay::Symbol => out.push_str(&cfg.currency_symbol),
        CurrencyDisplay::Code => {
            out.push_str(&cfg.currency_code);
            out.push(' ');
        }
    }
    out.push_str(&group_thousands(integer, &cfg.thousands_separator));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats a date in the configured layout.
pub fn format_date(date: NaiveDate, cfg: &FormattingConfig) -> String {
    match cfg.date_format {
        DateFormat::DdMmYyyy => date.format("%d/%m/%Y").to_string(),
        DateFormat::MmDdYyyy => date.format("%m/%d/%Y").to_string(),
        DateFormat::YyyyMmDd => date.format("%Y-%m-%d").to_string(),
        DateFormat::Long => date.format("%-d %B %Y").to_string(),
    }
}

/// Formats a pay period as `"September 2025"`.
pub fn format_period(period: &PayPeriod) -> String {
    format!("{} {}", month_name(period.month()), period.year())
}

/// Builds the plain-text notification sent to an employee when a pay slip
/// is ready.
///
/// The prorated base line is only included when it differs from the
/// nominal base salary.
pub fn pay_slip_message(slip: &PaySlip, cfg: &FormattingConfig) -> String {
    let period = PayPeriod::parse(&slip.period)
        .map(|p| format_period(&p))
        .unwrap_or_else(|_| slip.period.clone());

    let mut message = format!(
        "*{} PAYROLL*\n\nHello {},\n\nYour pay slip for {} is ready!\n\nNet Salary (Take-home): {}",
        cfg.company_name.to_uppercase(),
        slip.employee_name,
        period,
        format_currency(slip.net_salary, cfg)
    );

    if slip.prorated_base != slip.base_salary {
        message.push_str(&format!(
            "\nProrated Base: {}",
            format_currency(slip.prorated_base, cfg)
        ));
    }

    message.push_str(&format!(
        "\n\nThank you for your dedication to {}!",
        cfg.company_name
    ));
    message
}
