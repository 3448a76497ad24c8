//! Day classification, tooltips, and period scans.

use crate::config::BusinessConfig;
use crate::date::Date;
use crate::engine::BusinessDays;
use crate::national::HolidayKind;
use crate::regional::{find_regional_holiday, HolidayScope, RegionalHoliday};
use serde::Serialize;

/// Kind of calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    /// Neither weekend nor holiday.
    Business,
    /// Saturday or Sunday.
    Weekend,
    /// National or observed regional holiday on a weekday.
    Holiday,
}

/// Result of [`BusinessDays::day_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayClassification {
    /// Kind of day.
    pub kind: DayKind,
    /// Human-readable description.
    pub description: String,
    /// Whether the day carries an optional regional entry.
    pub is_optional: bool,
    /// Scope of the regional entry that matched, if any.
    pub scope: Option<HolidayScope>,
}

/// Where a holiday in a period listing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "source")]
pub enum HolidaySource {
    /// National table.
    National {
        /// Fixed or movable.
        kind: HolidayKind,
    },
    /// Regional overlay.
    Regional {
        /// Jurisdiction.
        scope: HolidayScope,
    },
}

/// One holiday found by [`BusinessDays::holidays_for_period`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodHoliday {
    /// Calendar day.
    #[serde(rename = "dateISO")]
    pub date: Date,
    /// Holiday name or regional label.
    pub name: String,
    /// National or regional origin.
    #[serde(flatten)]
    pub source: HolidaySource,
    /// Optional regional day off.
    pub optional: bool,
    /// Falls on a Saturday or Sunday.
    pub on_weekend: bool,
}

/// Day counts produced by [`BusinessDays::business_days_stats`].
///
/// `business + weekend + holiday == total`; `optional_holiday` counts the
/// weekdays carrying an optional regional entry, whether observed or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    /// Calendar days in the range.
    pub total: u32,
    /// Business days.
    pub business: u32,
    /// Saturdays and Sundays.
    pub weekend: u32,
    /// Weekday holidays.
    pub holiday: u32,
    /// Weekdays with an optional regional entry.
    pub optional_holiday: u32,
}

fn regional_description(entry: &RegionalHoliday) -> String {
    if entry.optional {
        format!("Optional day off ({}): {}", entry.scope.label(), entry.label)
    } else {
        format!("Regional holiday ({}): {}", entry.scope.label(), entry.label)
    }
}

impl BusinessDays {
    /// Classify `date` under `config`.
    ///
    /// Weekends win over holidays, and national holidays over regional ones.
    /// An optional regional entry that `config` does not observe leaves the
    /// day a business day but still sets `is_optional`.
    pub fn day_type(&self, date: Date, config: &BusinessConfig) -> DayClassification {
        let weekday = date.weekday();
        if weekday.is_weekend() {
            return DayClassification {
                kind: DayKind::Weekend,
                description: weekday.to_string(),
                is_optional: false,
                scope: None,
            };
        }
        if let Some(name) = self.national_holiday_name(date) {
            return DayClassification {
                kind: DayKind::Holiday,
                description: format!("National holiday: {name}"),
                is_optional: false,
                scope: None,
            };
        }
        match find_regional_holiday(date, config) {
            Some(entry) if config.include_optional() || !entry.optional => DayClassification {
                kind: DayKind::Holiday,
                description: regional_description(entry),
                is_optional: entry.optional,
                scope: Some(entry.scope),
            },
            Some(entry) => DayClassification {
                kind: DayKind::Business,
                description: format!("business day ({} not observed)", regional_description(entry)),
                is_optional: true,
                scope: Some(entry.scope),
            },
            None => DayClassification {
                kind: DayKind::Business,
                description: "business day".to_string(),
                is_optional: false,
                scope: None,
            },
        }
    }

    /// Short note for a date picker: `None` on ordinary business days.
    pub fn day_tooltip(&self, date: Date, config: &BusinessConfig) -> Option<String> {
        let class = self.day_type(date, config);
        if class.kind == DayKind::Business && !class.is_optional {
            return None;
        }
        Some(format!("{} ({date})", class.description))
    }

    /// Every national and observed regional holiday between `start` and
    /// `end` inclusive, in date order, weekends included.
    pub fn holidays_for_period(
        &self,
        start: Date,
        end: Date,
        config: &BusinessConfig,
    ) -> Vec<PeriodHoliday> {
        let (from, to) = if start <= end { (start, end) } else { (end, start) };
        let mut found = Vec::new();
        for date in from.days_through(to) {
            let on_weekend = BusinessDays::is_weekend(date);
            if let Some(h) = self
                .cache()
                .national_for(date.year())
                .iter()
                .find(|h| h.date == date)
            {
                found.push(PeriodHoliday {
                    date,
                    name: h.name.to_string(),
                    source: HolidaySource::National { kind: h.kind },
                    optional: false,
                    on_weekend,
                });
            }
            if let Some(entry) = find_regional_holiday(date, config)
                .filter(|e| config.include_optional() || !e.optional)
            {
                found.push(PeriodHoliday {
                    date,
                    name: entry.label.clone(),
                    source: HolidaySource::Regional { scope: entry.scope },
                    optional: entry.optional,
                    on_weekend,
                });
            }
        }
        tracing::trace!(%from, %to, count = found.len(), "holidays for period");
        found
    }

    /// Classify every day between `start` and `end` inclusive and count the
    /// kinds.
    pub fn business_days_stats(&self, start: Date, end: Date, config: &BusinessConfig) -> PeriodStats {
        let (from, to) = if start <= end { (start, end) } else { (end, start) };
        from.days_through(to)
            .fold(PeriodStats::default(), |mut stats, date| {
                let class = self.day_type(date, config);
                stats.total += 1;
                match class.kind {
                    DayKind::Business => stats.business += 1,
                    DayKind::Weekend => stats.weekend += 1,
                    DayKind::Holiday => stats.holiday += 1,
                }
                if class.is_optional {
                    stats.optional_holiday += 1;
                }
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regional::{load_regional_config, RegionalTable};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn config() -> BusinessConfig {
        let mut table = RegionalTable::new();
        table.insert(
            2024,
            vec![
                RegionalHoliday::new(date(2024, 1, 25), "Aniversário de São Paulo", HolidayScope::City, false),
                RegionalHoliday::new(date(2024, 10, 28), "Dia do Servidor Público", HolidayScope::Organization, true),
            ],
        );
        load_regional_config(table).unwrap()
    }

    #[test]
    fn weekend_description_is_weekday_name() {
        let engine = BusinessDays::new();
        let cfg = config();
        assert_eq!(engine.day_type(date(2024, 1, 6), &cfg).description, "Saturday");
        assert_eq!(engine.day_type(date(2024, 1, 7), &cfg).description, "Sunday");
        assert_eq!(engine.day_type(date(2024, 1, 7), &cfg).kind, DayKind::Weekend);
    }

    #[test]
    fn national_and_regional_holidays() {
        let engine = BusinessDays::new();
        let cfg = config();
        let ny = engine.day_type(date(2024, 1, 1), &cfg);
        assert_eq!(ny.kind, DayKind::Holiday);
        assert!(ny.description.contains("Confraternização Universal"));

        let sp = engine.day_type(date(2024, 1, 25), &cfg);
        assert_eq!(sp.kind, DayKind::Holiday);
        assert_eq!(sp.scope, Some(HolidayScope::City));
        assert!(!sp.is_optional);
        assert!(sp.description.contains("Municipal"));
    }

    #[test]
    fn optional_day_depends_on_config() {
        let engine = BusinessDays::new();
        let cfg = config();
        let servidor = date(2024, 10, 28);

        let off = engine.day_type(servidor, &cfg);
        assert_eq!(off.kind, DayKind::Business);
        assert!(off.is_optional);

        let on = engine.day_type(servidor, &cfg.with_include_optional(true));
        assert_eq!(on.kind, DayKind::Holiday);
        assert!(on.is_optional);
        assert!(on.description.contains("Dia do Servidor Público"));
    }

    #[test]
    fn tooltips() {
        let engine = BusinessDays::new();
        let cfg = config();
        assert_eq!(engine.day_tooltip(date(2024, 1, 2), &cfg), None);
        assert_eq!(
            engine.day_tooltip(date(2024, 12, 25), &cfg).as_deref(),
            Some("National holiday: Natal (2024-12-25)")
        );
        assert!(engine.day_tooltip(date(2024, 10, 28), &cfg).is_some());
    }

    #[test]
    fn holidays_in_first_quarter() {
        let engine = BusinessDays::new();
        let cfg = config();
        let found = engine.holidays_for_period(date(2024, 1, 1), date(2024, 3, 31), &cfg);
        let names: Vec<_> = found.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Confraternização Universal",
                "Aniversário de São Paulo",
                "Carnaval",
                "Sexta-feira Santa",
                "Páscoa",
            ]
        );
        // Easter is always a Sunday.
        assert!(found.last().unwrap().on_weekend);
        assert_eq!(found[1].source, HolidaySource::Regional { scope: HolidayScope::City });
        // reversed bounds give the same list
        assert_eq!(engine.holidays_for_period(date(2024, 3, 31), date(2024, 1, 1), &cfg), found);
    }

    #[test]
    fn stats_partition_the_range() {
        let engine = BusinessDays::new();
        let cfg = config();
        let stats = engine.business_days_stats(date(2024, 10, 1), date(2024, 10, 31), &cfg);
        // October 2024: 23 weekdays, Oct 12 (Aparecida) is a Saturday.
        assert_eq!(stats.total, 31);
        assert_eq!(stats.weekend, 8);
        assert_eq!(stats.holiday, 0);
        assert_eq!(stats.business, 23);
        assert_eq!(stats.optional_holiday, 1);

        let with_opt = engine.business_days_stats(
            date(2024, 10, 1),
            date(2024, 10, 31),
            &cfg.with_include_optional(true),
        );
        assert_eq!(with_opt.holiday, 1);
        assert_eq!(with_opt.business, 22);
        assert_eq!(with_opt.business + with_opt.weekend + with_opt.holiday, with_opt.total);
    }
}
