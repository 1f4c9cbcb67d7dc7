//! Holiday definitions.
//!
//! This module contains the [`HolidayDefinition`] type that makes up a holiday
//! pool, along with the eligibility groups that decide who receives a holiday
//! allowance.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Religion;

/// The category of a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayType {
    /// Nationwide public holiday.
    National,
    /// Special non-working day.
    SpecialNonWorking,
    /// Special working day; does not reduce the work-day count.
    SpecialWorking,
    /// Local (provincial or city) holiday.
    Local,
    /// Company anniversary.
    Anniversary,
    /// Regular holiday.
    Regular,
}

impl HolidayType {
    /// Returns true when the holiday removes a working day from the period.
    pub fn is_non_working(&self) -> bool {
        !matches!(self, HolidayType::SpecialWorking)
    }
}

/// A group token in a holiday's eligibility list.
///
/// `All` is the sentinel that admits every employee regardless of religion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibleGroup {
    /// Every employee.
    All,
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

impl EligibleGroup {
    /// Returns true when an employee of the given religion belongs to this group.
    pub fn admits(&self, religion: Religion) -> bool {
        match self {
            EligibleGroup::All => true,
            EligibleGroup::Islam => religion == Religion::Islam,
            EligibleGroup::Kristen => religion == Religion::Kristen,
            EligibleGroup::Katolik => religion == Religion::Katolik,
            EligibleGroup::Hindu => religion == Religion::Hindu,
            EligibleGroup::Budha => religion == Religion::Budha,
            EligibleGroup::Other => religion == Religion::Other,
        }
    }
}

/// A holiday in a holiday pool.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EligibleGroup, HolidayDefinition, HolidayType, Religion};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let holiday = HolidayDefinition {
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
/// };
/// assert!(holiday.is_eligible(Religion::Hindu));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDefinition {
    /// Unique identifier for the holiday.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The holiday category.
    #[serde(rename = "type")]
    pub holiday_type: HolidayType,
    /// Fraction of the (prorated) base salary paid as holiday allowance.
    #[serde(default)]
    pub allowance_multiplier: Decimal,
    /// Inactive holidays are ignored entirely.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Groups eligible for the holiday allowance. An empty list admits no one.
    #[serde(default)]
    pub eligible_religions: Vec<EligibleGroup>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local-language name from a public holiday feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    /// English name from a public holiday feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_name: Option<String>,
}

fn default_active() -> bool {
    true
}

impl HolidayDefinition {
    /// Returns true when an employee of the given religion may receive this
    /// holiday's allowance.
    pub fn is_eligible(&self, religion: Religion) -> bool {
        self.eligible_religions.iter().any(|g| g.admits(religion))
    }
}

/// An entry from a public holiday feed (one country, one year).
///
/// Feed holidays become national holidays that admit everyone and carry no
/// allowance multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHolidayFeedEntry {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// Local-language name.
    #[serde(default)]
    pub local_name: Option<String>,
    /// English name.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<PublicHolidayFeedEntry> for HolidayDefinition {
    fn from(entry: PublicHolidayFeedEntry) -> Self {
        let source_name = entry
            .local_name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| entry.name.clone().filter(|n| !n.is_empty()));
        let slug = slugify(source_name.as_deref().unwrap_or_default());
        let display = source_name.unwrap_or_else(|| "Holiday".to_string());
        let id = if slug.is_empty() {
            entry.date.to_string()
        } else {
            slug
        };

        HolidayDefinition {
            id,
            name: display.clone(),
            date: entry.date,
            holiday_type: HolidayType::National,
            allowance_multiplier: Decimal::ZERO,
            is_active: true,
            eligible_religions: vec![EligibleGroup::All],
            description: entry.name.clone().or_else(|| entry.local_name.clone()),
            local_name: Some(display),
            english_name: entry.name.or(entry.local_name),
        }
    }
}

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("invalid slug pattern"));

/// Lower-cases and replaces every run outside `[a-z0-9]` with one underscore.
fn slugify(name: &str) -> String {
    NON_SLUG_RUN
        .replace_all(&name.to_lowercase(), "_")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holiday(groups: Vec<EligibleGroup>) -> HolidayDefinition {
        HolidayDefinition {
            id: "test".to_string(),
            name: "Test Holiday".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
            holiday_type: HolidayType::Regular,
            allowance_multiplier: Decimal::new(5, 1),
            is_active: true,
            eligible_religions: groups,
            description: None,
            local_name: None,
            english_name: None,
        }
    }

    #[test]
    fn test_all_sentinel_admits_every_religion() {
        let h = holiday(vec![EligibleGroup::All]);
        for religion in [
            Religion::Islam,
            Religion::Kristen,
            Religion::Katolik,
            Religion::Hindu,
            Religion::Budha,
            Religion::Other,
        ] {
            assert!(h.is_eligible(religion));
        }
    }

    #[test]
    fn test_specific_groups_admit_only_members() {
        let h = holiday(vec![EligibleGroup::Kristen, EligibleGroup::Katolik]);
        assert!(h.is_eligible(Religion::Kristen));
        assert!(h.is_eligible(Religion::Katolik));
        assert!(!h.is_eligible(Religion::Islam));
        assert!(!h.is_eligible(Religion::Other));
    }

    #[test]
    fn test_empty_list_admits_no_one() {
        let h = holiday(vec![]);
        assert!(!h.is_eligible(Religion::Islam));
    }

    #[test]
    fn test_special_working_is_not_non_working() {
        assert!(!HolidayType::SpecialWorking.is_non_working());
        assert!(HolidayType::National.is_non_working());
        assert!(HolidayType::SpecialNonWorking.is_non_working());
    }

    #[test]
    fn test_deserialize_holiday_with_defaults() {
        let json = r#"{
            "id": "rizal_day",
            "name": "Rizal Day",
            "date": "2025-12-30",
            "type": "regular",
            "eligible_religions": ["all"]
        }"#;
        let h: HolidayDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(h.holiday_type, HolidayType::Regular);
        assert!(h.is_active);
        assert_eq!(h.allowance_multiplier, Decimal::ZERO);
        assert_eq!(h.eligible_religions, vec![EligibleGroup::All]);
    }

    #[test]
    fn test_holiday_type_serialization() {
        assert_eq!(
            serde_json::to_string(&HolidayType::SpecialNonWorking).unwrap(),
            "\"special_non_working\""
        );
        let parsed: HolidayType = serde_json::from_str("\"anniversary\"").unwrap();
        assert_eq!(parsed, HolidayType::Anniversary);
    }

    #[test]
    fn test_feed_entry_becomes_national_holiday_for_all() {
        let entry: PublicHolidayFeedEntry = serde_json::from_str(
            r#"{"date": "2025-06-12", "localName": "Araw ng Kalayaan", "name": "Independence Day"}"#,
        )
        .unwrap();

        let h: HolidayDefinition = entry.into();
        assert_eq!(h.id, "araw_ng_kalayaan");
        assert_eq!(h.name, "Araw ng Kalayaan");
        assert_eq!(h.english_name.as_deref(), Some("Independence Day"));
        assert_eq!(h.holiday_type, HolidayType::National);
        assert_eq!(h.allowance_multiplier, Decimal::ZERO);
        assert!(h.is_active);
        assert_eq!(h.eligible_religions, vec![EligibleGroup::All]);
    }

    #[test]
    fn test_feed_entry_without_names_uses_date_id() {
        let entry = PublicHolidayFeedEntry {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            local_name: None,
            name: None,
        };
        let h: HolidayDefinition = entry.into();
        assert_eq!(h.name, "Holiday");
        assert_eq!(h.id, "2025-01-01");

        let entry = PublicHolidayFeedEntry {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            local_name: Some("".to_string()),
            name: None,
        };
        let h: HolidayDefinition = entry.into();
        assert_eq!(h.id, "2025-01-01");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("All Saints' Day"), "all_saints_day");
        assert_eq!(slugify("New Year!"), "new_year_");
        assert_eq!(slugify("  Día de la Raza"), "_d_a_de_la_raza");
        assert_eq!(slugify("---"), "_");
    }
}
