//! Attendance summarization.
//!
//! Turns daily attendance records into the [`AttendanceAggregate`] used for
//! proration and overtime.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    checked_sum, round_hours, AttendanceAggregate, AttendanceRecord, AuditStep,
    HolidayDefinition, PayPeriod, STANDARD_DAY_HOURS,
};

/// The result of summarizing attendance for one pay period.
#[derive(Debug, Clone)]
pub struct AttendanceSummaryResult {
    /// The aggregate for the period.
    pub aggregate: AttendanceAggregate,
    /// Number of records that fell inside the period.
    pub records_in_period: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts Monday-to-Friday days in `start..=end`, less active non-working
/// holidays that fall on a weekday in the range.
///
/// Several holidays on the same date remove that date once. The count never
/// goes below zero, and an inverted range counts zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::count_work_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
/// assert_eq!(count_work_days(start, end, &[]), 22);
/// ```
pub fn count_work_days(start: NaiveDate, end: NaiveDate, holidays: &[HolidayDefinition]) -> u32 {
    if end < start {
        return 0;
    }

    let weekdays = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_weekday(*d))
        .count();

    let holiday_dates: BTreeSet<NaiveDate> = holidays
        .iter()
        .filter(|h| h.is_active && h.holiday_type.is_non_working())
        .map(|h| h.date)
        .filter(|d| *d >= start && *d <= end && is_weekday(*d))
        .collect();

    let count = weekdays.saturating_sub(holiday_dates.len());
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Summarizes daily records into an attendance aggregate for a pay period.
///
/// - `work_days`: [`count_work_days`] over the whole month
/// - `days_present`: records that are `present` or have hours worked
/// - `overtime_hours`: sum of record overtime, rounded to two places
/// - `expected_hours`: `work_days × 8`
///
/// Records dated outside the period are ignored.
///
/// # Errors
///
/// Returns `CalculationError` when the overtime hours overflow.
pub fn summarize_attendance(
    records: &[AttendanceRecord],
    period: &PayPeriod,
    holidays: &[HolidayDefinition],
    step_number: u32,
) -> EngineResult<AttendanceSummaryResult> {
    let work_days = count_work_days(period.start_date(), period.end_date(), holidays);

    let in_period: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| period.contains(r.date))
        .collect();

    let days_present = in_period.iter().filter(|r| r.counts_as_present()).count();
    let overtime_hours = round_hours(checked_sum(
        "overtime hours",
        in_period.iter().map(|r| r.overtime_hours),
    )?);
    let expected_hours = Decimal::from(work_days) * Decimal::from(STANDARD_DAY_HOURS);

    let aggregate = AttendanceAggregate {
        work_days: Some(Decimal::from(work_days)),
        days_present: Some(Decimal::from(days_present)),
        overtime_hours: Some(overtime_hours),
        expected_hours: Some(expected_hours),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_summary".to_string(),
        rule_name: "Attendance Summary".to_string(),
        input: serde_json::json!({
            "period": period.to_string(),
            "records": records.len(),
            "records_in_period": in_period.len(),
            "holidays": holidays.len()
        }),
        output: serde_json::json!({
            "work_days": work_days,
            "days_present": days_present,
            "overtime_hours": overtime_hours.normalize().to_string(),
            "expected_hours": expected_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} of {} work days present, {} overtime hours",
            days_present,
            work_days,
            overtime_hours.normalize()
        ),
    };

    Ok(AttendanceSummaryResult {
        aggregate,
        records_in_period: in_period.len(),
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{AttendanceStatus, EligibleGroup, HolidayType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn holiday(date: &str, holiday_type: HolidayType, is_active: bool) -> HolidayDefinition {
        HolidayDefinition {
            id: format!("h_{}", date),
            name: "Test Holiday".to_string(),
            date: make_date(date),
            holiday_type,
            allowance_multiplier: Decimal::ZERO,
            is_active,
            eligible_religions: vec![EligibleGroup::All],
            description: None,
            local_name: None,
            english_name: None,
        }
    }

    fn record(date: &str, status: AttendanceStatus, hours: &str, overtime: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "emp_001".to_string(),
            date: make_date(date),
            time_in: None,
            time_out: None,
            hours_worked: dec(hours),
            overtime_hours: dec(overtime),
            late_minutes: 0,
            status,
        }
    }

    /// WD-001: September 2025 has 22 weekdays
    #[test]
    fn test_wd_001_full_month_without_holidays() {
        assert_eq!(
            count_work_days(make_date("2025-09-01"), make_date("2025-09-30"), &[]),
            22
        );
    }

    /// WD-002: a weekday holiday removes one day
    #[test]
    fn test_wd_002_weekday_holiday_removed() {
        // 2025-09-15 is a Monday
        let holidays = vec![holiday("2025-09-15", HolidayType::Anniversary, true)];
        assert_eq!(
            count_work_days(make_date("2025-09-01"), make_date("2025-09-30"), &holidays),
            21
        );
    }

    /// WD-003: weekend, inactive, special working and out-of-range holidays
    /// do not reduce the count
    #[test]
    fn test_wd_003_holidays_that_do_not_count() {
        let holidays = vec![
            holiday("2025-09-13", HolidayType::National, true), // Saturday
            holiday("2025-09-16", HolidayType::National, false),
            holiday("2025-09-17", HolidayType::SpecialWorking, true),
            holiday("2025-10-01", HolidayType::National, true),
        ];
        assert_eq!(
            count_work_days(make_date("2025-09-01"), make_date("2025-09-30"), &holidays),
            22
        );
    }

    /// WD-004: two holidays on one date remove it once
    #[test]
    fn test_wd_004_duplicate_holiday_dates() {
        let holidays = vec![
            holiday("2025-09-15", HolidayType::Anniversary, true),
            holiday("2025-09-15", HolidayType::Local, true),
        ];
        assert_eq!(
            count_work_days(make_date("2025-09-01"), make_date("2025-09-30"), &holidays),
            21
        );
    }

    #[test]
    fn test_weekend_only_range_and_floor() {
        // Saturday and Sunday only
        assert_eq!(
            count_work_days(make_date("2025-09-13"), make_date("2025-09-14"), &[]),
            0
        );
        let holidays = vec![holiday("2025-09-15", HolidayType::National, true)];
        assert_eq!(
            count_work_days(make_date("2025-09-15"), make_date("2025-09-15"), &holidays),
            0
        );
    }

    #[test]
    fn test_inverted_range_is_zero() {
        assert_eq!(
            count_work_days(make_date("2025-09-30"), make_date("2025-09-01"), &[]),
            0
        );
    }

    /// AS-001: aggregate from daily records
    #[test]
    fn test_as_001_summarize_month() {
        let period = PayPeriod::parse("9/2025").unwrap();
        let holidays = vec![holiday("2025-09-15", HolidayType::Anniversary, true)];
        let records = vec![
            record("2025-09-01", AttendanceStatus::Present, "9.5", "1.5"),
            record("2025-09-02", AttendanceStatus::Present, "8", "0"),
            record("2025-09-03", AttendanceStatus::Absent, "0", "0"),
            record("2025-09-04", AttendanceStatus::Pending, "4", "0.333"),
            record("2025-09-05", AttendanceStatus::OnLeave, "0", "0"),
            record("2025-09-08", AttendanceStatus::Present, "10.25", "2.25"),
        ];

        let result = summarize_attendance(&records, &period, &holidays, 1).unwrap();

        assert_eq!(result.aggregate.work_days, Some(dec("21")));
        assert_eq!(result.aggregate.days_present, Some(dec("4")));
        assert_eq!(result.aggregate.overtime_hours, Some(dec("4.08")));
        assert_eq!(result.aggregate.expected_hours, Some(dec("168")));
        assert_eq!(result.records_in_period, 6);
        assert_eq!(result.audit_step.output["work_days"], 21);
    }

    /// AS-002: records outside the period are ignored
    #[test]
    fn test_as_002_records_outside_period_ignored() {
        let period = PayPeriod::parse("9/2025").unwrap();
        let records = vec![
            record("2025-08-29", AttendanceStatus::Present, "8", "2"),
            record("2025-09-01", AttendanceStatus::Present, "8", "0"),
        ];

        let result = summarize_attendance(&records, &period, &[], 1).unwrap();

        assert_eq!(result.aggregate.days_present, Some(dec("1")));
        assert_eq!(result.aggregate.overtime_hours, Some(Decimal::ZERO));
        assert_eq!(result.records_in_period, 1);
    }

    #[test]
    fn test_no_records_gives_zero_presence() {
        let period = PayPeriod::parse("2/2025").unwrap();
        let result = summarize_attendance(&[], &period, &[], 1).unwrap();

        assert_eq!(result.aggregate.work_days, Some(dec("20")));
        assert_eq!(result.aggregate.days_present, Some(Decimal::ZERO));
        assert_eq!(result.aggregate.expected_hours, Some(dec("160")));
    }

    #[test]
    fn test_overtime_total_overflow_is_an_error() {
        let period = PayPeriod::parse("9/2025").unwrap();
        let mut first = record("2025-09-01", AttendanceStatus::Present, "8", "0");
        first.overtime_hours = Decimal::MAX;
        let records = vec![first, record("2025-09-02", AttendanceStatus::Present, "9", "1")];

        let result = summarize_attendance(&records, &period, &[], 1);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }
}
