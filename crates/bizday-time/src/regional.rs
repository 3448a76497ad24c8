//! Regional holiday overlay.
//!
//! State, city, and organisation holidays are not computed: they come from
//! the [`BusinessConfig`] as a year-indexed table.  Entries marked
//! `optional` ("ponto facultativo") only count as holidays when the config
//! enables [`include_optional`](BusinessConfig::include_optional).

use crate::config::BusinessConfig;
use crate::date::Date;
use bizday_core::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Jurisdiction at which a regional holiday applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayScope {
    /// A state holiday.
    State,
    /// A municipal holiday.
    City,
    /// An organisation-specific day off.
    Organization,
}

impl HolidayScope {
    /// Localised label shown to end users.
    pub fn label(&self) -> &'static str {
        match self {
            HolidayScope::State => "Estadual",
            HolidayScope::City => "Municipal",
            HolidayScope::Organization => "Organizacional",
        }
    }
}

impl std::fmt::Display for HolidayScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HolidayScope::State => "State",
            HolidayScope::City => "City",
            HolidayScope::Organization => "Organization",
        };
        write!(f, "{s}")
    }
}

/// A configured regional holiday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionalHoliday {
    /// Calendar day of the holiday.
    #[serde(rename = "dateISO")]
    pub date: Date,
    /// Display label.
    pub label: String,
    /// Jurisdiction.
    pub scope: HolidayScope,
    /// Discretionary non-working day.
    #[serde(default)]
    pub optional: bool,
}

impl RegionalHoliday {
    /// Create a new regional holiday entry.
    pub fn new(date: Date, label: impl Into<String>, scope: HolidayScope, optional: bool) -> Self {
        Self {
            date,
            label: label.into(),
            scope,
            optional,
        }
    }
}

/// Regional holidays keyed by year.
pub type RegionalTable = BTreeMap<i32, Vec<RegionalHoliday>>;

/// Check that every entry lies inside the year it is filed under.
pub(crate) fn validate_table(table: &RegionalTable) -> Result<()> {
    for (year, entries) in table {
        if let Some(stray) = entries.iter().find(|h| h.date.year() != *year) {
            return Err(Error::Config(format!(
                "regional holiday {:?} on {} is filed under year {year}",
                stray.label, stray.date
            )));
        }
    }
    Ok(())
}

/// Regional holidays observed in `year` under `config`.
///
/// Optional entries are dropped unless the config includes them.  A year
/// missing from the table yields an empty list.
pub fn regional_holidays(year: i32, config: &BusinessConfig) -> Vec<RegionalHoliday> {
    config
        .regional_for_year(year)
        .iter()
        .filter(|h| config.include_optional() || !h.optional)
        .cloned()
        .collect()
}

/// The configured entry for `date`, ignoring the optional filter.
pub fn find_regional_holiday(date: Date, config: &BusinessConfig) -> Option<&RegionalHoliday> {
    config
        .regional_for_year(date.year())
        .iter()
        .find(|h| h.date == date)
}

/// The entry for `date` if it is observed under `config`.
pub(crate) fn observed_regional_holiday(
    date: Date,
    config: &BusinessConfig,
) -> Option<&RegionalHoliday> {
    config
        .regional_for_year(date.year())
        .iter()
        .filter(|h| config.include_optional() || !h.optional)
        .find(|h| h.date == date)
}

/// Return `true` if `date` is an observed regional holiday under `config`.
pub fn is_regional_holiday(date: Date, config: &BusinessConfig) -> bool {
    observed_regional_holiday(date, config).is_some()
}

/// Label of the regional holiday configured for `date`.
pub fn regional_holiday_name(date: Date, config: &BusinessConfig) -> Option<&str> {
    find_regional_holiday(date, config).map(|h| h.label.as_str())
}

/// Scope of the regional holiday configured for `date`.
pub fn regional_holiday_scope(date: Date, config: &BusinessConfig) -> Option<HolidayScope> {
    find_regional_holiday(date, config).map(|h| h.scope)
}

/// Return `true` if the regional holiday configured for `date` is optional.
pub fn is_regional_holiday_optional(date: Date, config: &BusinessConfig) -> bool {
    find_regional_holiday(date, config).is_some_and(|h| h.optional)
}

/// Default configuration with its regional table replaced by `table`.
///
/// The table replaces the default one wholesale; years are not merged.
pub fn load_regional_config(table: RegionalTable) -> Result<BusinessConfig> {
    BusinessConfig::default().with_regional_table(table)
}

/// Parse the persisted JSON shape `{"2024": [{"dateISO": ..., "label": ...,
/// "scope": ..., "optional": ...}]}` and load it like
/// [`load_regional_config`].
pub fn load_regional_config_json(json: &str) -> Result<BusinessConfig> {
    let table: RegionalTable = serde_json::from_str(json)
        .map_err(|e| Error::Config(format!("regional holiday table: {e}")))?;
    load_regional_config(table)
}
