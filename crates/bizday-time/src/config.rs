//! Business-day configuration.
//!
//! [`BusinessConfig`] is an immutable value threaded explicitly through
//! every engine call.  "Mutating" methods return a new config; nothing in
//! the crate reads configuration from global state.

use crate::regional::{validate_table, RegionalHoliday, RegionalTable};
use bizday_core::errors::{Error, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Source of regional table ids.  Id 0 is reserved for the empty table.
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Calendar configuration: timezone, optional-holiday switch, and the
/// regional holiday table.
///
/// Equality compares contents; the table id is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ConfigData", into = "ConfigData")]
pub struct BusinessConfig {
    timezone: String,
    tz: Tz,
    include_optional: bool,
    regional_by_year: Arc<RegionalTable>,
    table_id: u64,
}

impl PartialEq for BusinessConfig {
    fn eq(&self, other: &Self) -> bool {
        self.timezone == other.timezone
            && self.include_optional == other.include_optional
            && (self.table_id == other.table_id || self.regional_by_year == other.regional_by_year)
    }
}

impl Eq for BusinessConfig {}

/// Serialised form of [`BusinessConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigData {
    #[serde(default = "default_timezone")]
    timezone: String,
    #[serde(default)]
    include_optional: bool,
    #[serde(default)]
    regional_by_year: RegionalTable,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl TryFrom<ConfigData> for BusinessConfig {
    type Error = Error;

    fn try_from(data: ConfigData) -> Result<Self> {
        BusinessConfig::new(&data.timezone, data.include_optional, data.regional_by_year)
    }
}

impl From<BusinessConfig> for ConfigData {
    fn from(config: BusinessConfig) -> Self {
        ConfigData {
            timezone: config.timezone,
            include_optional: config.include_optional,
            regional_by_year: Arc::try_unwrap(config.regional_by_year)
                .unwrap_or_else(|shared| (*shared).clone()),
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            tz: Tz::America__Sao_Paulo,
            include_optional: false,
            regional_by_year: Arc::default(),
            table_id: 0,
        }
    }
}

impl BusinessConfig {
    /// Build a validated config.
    ///
    /// # Errors
    /// * [`Error::UnknownTimezone`] if `timezone` is not an IANA name.
    /// * [`Error::Config`] if a regional entry is filed under the wrong year.
    pub fn new(timezone: &str, include_optional: bool, regional_by_year: RegionalTable) -> Result<Self> {
        let tz = parse_timezone(timezone)?;
        validate_table(&regional_by_year)?;
        let (regional_by_year, table_id) = intern(regional_by_year);
        Ok(Self {
            timezone: timezone.to_string(),
            tz,
            include_optional,
            regional_by_year,
            table_id,
        })
    }

    /// The shared default instance: São Paulo time, optional holidays
    /// excluded, no regional table.
    pub fn shared_default() -> &'static BusinessConfig {
        static DEFAULT: OnceLock<BusinessConfig> = OnceLock::new();
        DEFAULT.get_or_init(BusinessConfig::default)
    }

    /// Parse a full config from JSON (`timezone`, `includeOptional`,
    /// `regionalByYear`; all optional).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BusinessConfig =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        tracing::debug!(
            timezone = %config.timezone,
            include_optional = config.include_optional,
            years = config.regional_by_year.len(),
            "loaded business-day configuration"
        );
        Ok(config)
    }

    // ── Derived configs ───────────────────────────────────────────────────────

    /// Copy with a different timezone.
    pub fn with_timezone(&self, timezone: &str) -> Result<Self> {
        let tz = parse_timezone(timezone)?;
        Ok(Self {
            timezone: timezone.to_string(),
            tz,
            ..self.clone()
        })
    }

    /// Copy with optional holidays switched on or off.
    pub fn with_include_optional(&self, include_optional: bool) -> Self {
        Self {
            include_optional,
            ..self.clone()
        }
    }

    /// Copy with the optional-holiday switch flipped.
    pub fn toggle_include_optional(&self) -> Self {
        self.with_include_optional(!self.include_optional)
    }

    /// Copy whose regional table is replaced wholesale by `table`.
    pub fn with_regional_table(&self, table: RegionalTable) -> Result<Self> {
        validate_table(&table)?;
        tracing::debug!(
            years = table.len(),
            entries = table.values().map(Vec::len).sum::<usize>(),
            "replacing regional holiday table"
        );
        let (regional_by_year, table_id) = intern(table);
        Ok(Self {
            regional_by_year,
            table_id,
            ..self.clone()
        })
    }

    /// Back to the defaults, discarding every customisation.
    pub fn reset(&self) -> Self {
        Self::default()
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// IANA timezone name.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Parsed timezone.
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Whether optional regional holidays count as holidays.
    pub fn include_optional(&self) -> bool {
        self.include_optional
    }

    /// The full regional table.
    pub fn regional_table(&self) -> &RegionalTable {
        &self.regional_by_year
    }

    /// Configured regional entries for `year`, unfiltered.
    pub fn regional_for_year(&self, year: i32) -> &[RegionalHoliday] {
        self.regional_by_year
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Id of the regional table, assigned once when the table enters a
    /// config and shared by every config derived from it.  Equal ids mean
    /// the same table; tables built separately get distinct ids even when
    /// their contents match.
    pub fn table_id(&self) -> u64 {
        self.table_id
    }
}

fn intern(table: RegionalTable) -> (Arc<RegionalTable>, u64) {
    if table.is_empty() {
        (Arc::default(), 0)
    } else {
        (Arc::new(table), NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::UnknownTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::regional::HolidayScope;

    fn table() -> RegionalTable {
        let mut t = RegionalTable::new();
        t.insert(
            2024,
            vec![RegionalHoliday::new(
                Date::from_ymd(2024, 1, 25).unwrap(),
                "Aniversário de São Paulo",
                HolidayScope::City,
                false,
            )],
        );
        t
    }

    #[test]
    fn default_values() {
        let cfg = BusinessConfig::shared_default();
        assert_eq!(cfg.timezone(), "America/Sao_Paulo");
        assert!(!cfg.include_optional());
        assert!(cfg.regional_table().is_empty());
        assert_eq!(*cfg, BusinessConfig::default());
    }

    #[test]
    fn derived_configs_leave_the_original_untouched() {
        let base = BusinessConfig::default();
        let toggled = base.toggle_include_optional();
        assert!(!base.include_optional());
        assert!(toggled.include_optional());
        assert_eq!(base.table_id(), toggled.table_id());

        let regional = base.with_regional_table(table()).unwrap();
        assert!(base.regional_table().is_empty());
        assert_eq!(regional.regional_for_year(2024).len(), 1);
        assert_ne!(base.table_id(), regional.table_id());
        assert_eq!(regional.toggle_include_optional().table_id(), regional.table_id());
        assert_eq!(regional.toggle_include_optional().reset(), base);
    }

    #[test]
    fn timezone_keeps_the_table() {
        let base = BusinessConfig::default().with_regional_table(table()).unwrap();
        let utc = base.with_timezone("UTC").unwrap();
        assert_eq!(utc.tz(), Tz::UTC);
        assert_eq!(base.table_id(), utc.table_id());
    }

    #[test]
    fn separately_built_tables_get_distinct_ids() {
        let a = BusinessConfig::default().with_regional_table(table()).unwrap();
        let b = BusinessConfig::default().with_regional_table(table()).unwrap();
        assert_ne!(a.table_id(), b.table_id());
        assert_ne!(a.table_id(), 0);
        assert_eq!(a, b);
        assert_eq!(BusinessConfig::default().with_regional_table(RegionalTable::new()).unwrap().table_id(), 0);
    }

    #[test]
    fn unknown_timezone_rejected() {
        assert_eq!(
            BusinessConfig::default().with_timezone("America/Atlantis"),
            Err(Error::UnknownTimezone("America/Atlantis".into()))
        );
    }

    #[test]
    fn json_round_trip() {
        let cfg = BusinessConfig::new("America/Manaus", true, table()).unwrap();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"includeOptional\":true"));
        let back = BusinessConfig::from_json_str(&json).unwrap();
        assert_eq!(back, cfg);
        assert_eq!(back.regional_table(), cfg.regional_table());
    }

    #[test]
    fn json_defaults_and_errors() {
        let cfg = BusinessConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, BusinessConfig::default());
        assert!(matches!(
            BusinessConfig::from_json_str(r#"{"timezone": "Nowhere/Land"}"#),
            Err(Error::Config(_))
        ));
    }
}
