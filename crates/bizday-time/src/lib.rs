//! # bizday-time
//!
//! Brazilian business-day calendar: dates, national and regional holiday
//! tables, configuration, memoisation, and business-day arithmetic.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Memo tables for holiday sets and predicates.
pub mod cache;

/// `Calendar` trait.
pub mod calendar;

/// Instant → calendar-day conversion in the configured timezone.
pub mod civil;

/// Day classification, tooltips, and period statistics.
pub mod classify;

/// `BusinessConfig` value object.
pub mod config;

/// `Date` type.
pub mod date;

/// Easter Sunday and the movable holidays.
pub mod easter;

/// Business-day predicate and arithmetic engine.
pub mod engine;

/// National holiday table.
pub mod national;

/// Regional holiday overlay.
pub mod regional;

/// Day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::{BusinessDayConvention, Direction};
pub use cache::{cached_national_holidays, clear_all_caches, clear_holiday_cache, CacheStats, HolidayCache};
pub use calendar::{Calendar, NationalCalendar};
pub use civil::{civil_date, civil_date_from_millis, civil_today};
pub use classify::{DayClassification, DayKind, HolidaySource, PeriodHoliday, PeriodStats};
pub use config::{BusinessConfig, DEFAULT_TIMEZONE};
pub use date::Date;
pub use easter::{easter_date, movable_holidays};
pub use engine::{BusinessDays, ConfiguredCalendar};
pub use national::{holiday_name, is_national_holiday, national_holidays, HolidayKind, NationalHoliday};
pub use regional::{
    find_regional_holiday, is_regional_holiday, is_regional_holiday_optional, load_regional_config,
    load_regional_config_json, regional_holiday_name, regional_holiday_scope, regional_holidays,
    HolidayScope, RegionalHoliday, RegionalTable,
};
pub use weekday::Weekday;
