//! Business-day predicate and arithmetic engine.
//!
//! [`BusinessDays`] holds nothing but a [`HolidayCache`]; every query takes
//! the [`BusinessConfig`] to apply explicitly.  Use
//! [`BusinessConfig::shared_default`] when no regional table is needed.
//!
//! ```
//! use bizday_time::{BusinessConfig, BusinessDays, Date};
//!
//! let engine = BusinessDays::new();
//! let cfg = BusinessConfig::shared_default();
//! let fri = Date::from_ymd(2024, 1, 5).unwrap();
//! assert_eq!(
//!     engine.add_business_days(fri, 1, cfg).unwrap(),
//!     Date::from_ymd(2024, 1, 8).unwrap()
//! );
//! ```

use crate::business_day_convention::{BusinessDayConvention, Direction};
use crate::cache::{HolidayCache, PredicateKey};
use crate::calendar::Calendar;
use crate::config::BusinessConfig;
use crate::date::{check_year, days_in_month, Date};
use crate::national::NationalHoliday;
use crate::regional::is_regional_holiday;
use bizday_core::ensure;
use bizday_core::errors::Result;
use std::sync::Arc;

/// Business-day service over an explicit cache.
#[derive(Debug, Clone, Default)]
pub struct BusinessDays {
    cache: Arc<HolidayCache>,
}

impl BusinessDays {
    /// Engine with a fresh, private cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine sharing an existing cache.
    pub fn with_cache(cache: Arc<HolidayCache>) -> Self {
        Self { cache }
    }

    /// Engine over the process-wide cache.
    pub fn global() -> Self {
        Self::with_cache(HolidayCache::global())
    }

    /// The underlying cache.
    pub fn cache(&self) -> &HolidayCache {
        &self.cache
    }

    /// Drop cached national holiday tables.
    pub fn clear_holiday_cache(&self) {
        self.cache.clear_holiday_cache();
    }

    /// Drop every cached table and predicate result.
    pub fn clear_all_caches(&self) {
        self.cache.clear_all();
    }

    /// A [`Calendar`] view of this engine under `config`.
    pub fn bind<'a>(&'a self, config: &'a BusinessConfig) -> ConfiguredCalendar<'a> {
        ConfiguredCalendar {
            engine: self,
            config,
        }
    }

    // ── National table ────────────────────────────────────────────────────────

    /// National holidays of `year` (cached).
    pub fn national_holidays(&self, year: i32) -> Result<Arc<[NationalHoliday]>> {
        self.cache.national_holidays(year)
    }

    /// Name of the national holiday on `date` (cached table).
    pub fn national_holiday_name(&self, date: Date) -> Option<&'static str> {
        self.cache
            .national_for(date.year())
            .iter()
            .find(|h| h.date == date)
            .map(|h| h.name)
    }

    /// Return `true` if `date` is a national holiday (cached table).
    pub fn is_national_holiday(&self, date: Date) -> bool {
        self.national_holiday_name(date).is_some()
    }

    // ── Predicates ────────────────────────────────────────────────────────────

    /// Return `true` on Saturdays and Sundays.
    pub fn is_weekend(date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// National or observed regional holiday.  Weekends are not holidays
    /// unless a holiday falls on them.
    pub fn is_holiday(&self, date: Date, config: &BusinessConfig) -> bool {
        self.cache
            .holiday_flag(PredicateKey::new(date, config), || {
                self.is_national_holiday(date) || is_regional_holiday(date, config)
            })
    }

    /// Neither a weekend nor a holiday.
    pub fn is_business_day(&self, date: Date, config: &BusinessConfig) -> bool {
        self.cache
            .business_flag(PredicateKey::new(date, config), || {
                !Self::is_weekend(date) && !self.is_holiday(date, config)
            })
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// First business day strictly after `date`.
    pub fn next_business_day(&self, date: Date, config: &BusinessConfig) -> Result<Date> {
        self.bind(config)
            .adjust(date.succ()?, BusinessDayConvention::Following)
    }

    /// Last business day strictly before `date`.
    pub fn prev_business_day(&self, date: Date, config: &BusinessConfig) -> Result<Date> {
        self.bind(config)
            .adjust(date.pred()?, BusinessDayConvention::Preceding)
    }

    /// Move `n` business days from `date`; backward when `n < 0`.
    ///
    /// `n == 0` returns `date` itself even when it is not a business day.
    /// For any other `n` the result is a business day, and for a business
    /// day `d`, `add(add(d, n), -n) == d`.
    pub fn add_business_days(&self, date: Date, n: i32, config: &BusinessConfig) -> Result<Date> {
        self.bind(config).advance_business_days(date, n)
    }

    /// Number of business days in the inclusive range between `start` and
    /// `end`.  The order of the arguments does not matter: the result is a
    /// count, never negative.
    pub fn business_days_diff(&self, start: Date, end: Date, config: &BusinessConfig) -> u32 {
        self.bind(config).business_days_in_range(start, end)
    }

    /// `date` if it is a business day, otherwise the nearest business day in
    /// `direction`.  Idempotent.
    pub fn clamp_to_business_day(
        &self,
        date: Date,
        config: &BusinessConfig,
        direction: Direction,
    ) -> Result<Date> {
        self.bind(config).adjust(date, direction.into())
    }

    /// Number of business days in `year`-`month`.
    pub fn business_days_in_month(&self, year: i32, month: u32, config: &BusinessConfig) -> Result<u32> {
        let (first, last) = month_bounds(year, month)?;
        Ok(self.business_days_diff(first, last, config))
    }

    /// Last business day of `year`-`month`.
    pub fn last_business_day_of_month(
        &self,
        year: i32,
        month: u32,
        config: &BusinessConfig,
    ) -> Result<Date> {
        let (_, last) = month_bounds(year, month)?;
        self.bind(config).adjust(last, BusinessDayConvention::Preceding)
    }
}

fn month_bounds(year: i32, month: u32) -> Result<(Date, Date)> {
    check_year(year)?;
    ensure!((1..=12).contains(&month), "month {month} out of range [1, 12]");
    Ok((
        Date::from_ymd(year, month, 1)?,
        Date::from_ymd(year, month, days_in_month(year, month))?,
    ))
}

/// A [`BusinessDays`] engine bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredCalendar<'a> {
    engine: &'a BusinessDays,
    config: &'a BusinessConfig,
}

impl ConfiguredCalendar<'_> {
    /// The bound configuration.
    pub fn config(&self) -> &BusinessConfig {
        self.config
    }
}

impl Calendar for ConfiguredCalendar<'_> {
    fn name(&self) -> &str {
        "Brazil (national + regional)"
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.engine.is_holiday(date, self.config)
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.engine.is_business_day(date, self.config)
    }
}
