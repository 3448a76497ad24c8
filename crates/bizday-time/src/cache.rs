//! Memoisation of holiday tables and business-day predicates.
//!
//! [`HolidayCache`] is an explicit object: construct one per tenant or per
//! test, or share the process-wide instance from [`HolidayCache::global`].
//!
//! Every cached value is a pure function of its key, so a hit is
//! indistinguishable from recomputation and clearing only costs time.
//! Predicate keys carry the date, the `include_optional` flag and the
//! config's regional table id, since the same date may be a business day under one
//! config and a holiday under another.
//!
//! Thread safety: each table sits behind an `RwLock`.  Two threads missing
//! on the same key both compute it and the second insert overwrites the
//! first with an equal value.

use crate::config::BusinessConfig;
use crate::date::{check_year, Date};
use crate::national::{national_unchecked, NationalHoliday};
use bizday_core::errors::Result;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Key of a cached predicate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PredicateKey {
    date: Date,
    include_optional: bool,
    table_id: u64,
}

impl PredicateKey {
    pub(crate) fn new(date: Date, config: &BusinessConfig) -> Self {
        Self {
            date,
            include_optional: config.include_optional(),
            table_id: config.table_id(),
        }
    }
}

/// Entry counts, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Years whose national table is cached.
    pub national_years: usize,
    /// Cached `is_holiday` results.
    pub holiday_entries: usize,
    /// Cached `is_business_day` results.
    pub business_entries: usize,
}

/// Thread-safe memo tables for holiday computation.
#[derive(Debug, Default)]
pub struct HolidayCache {
    national: RwLock<HashMap<i32, Arc<[NationalHoliday]>>>,
    holiday: RwLock<HashMap<PredicateKey, bool>>,
    business: RwLock<HashMap<PredicateKey, bool>>,
}

static GLOBAL: OnceLock<Arc<HolidayCache>> = OnceLock::new();

impl HolidayCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by [`crate::BusinessDays::global`].
    pub fn global() -> Arc<HolidayCache> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(HolidayCache::new())))
    }

    /// National holidays of `year`, computed on first use.
    ///
    /// Equal to [`crate::national::national_holidays`] for the same year.
    pub fn national_holidays(&self, year: i32) -> Result<Arc<[NationalHoliday]>> {
        check_year(year)?;
        Ok(self.national_for(year))
    }

    pub(crate) fn national_for(&self, year: i32) -> Arc<[NationalHoliday]> {
        if let Some(hit) = read(&self.national).get(&year) {
            tracing::trace!(year, "national holiday cache hit");
            return Arc::clone(hit);
        }
        tracing::debug!(year, "computing national holidays");
        let computed: Arc<[NationalHoliday]> = national_unchecked(year).into();
        write(&self.national).insert(year, Arc::clone(&computed));
        computed
    }

    pub(crate) fn holiday_flag(&self, key: PredicateKey, compute: impl FnOnce() -> bool) -> bool {
        memo(&self.holiday, key, compute)
    }

    pub(crate) fn business_flag(&self, key: PredicateKey, compute: impl FnOnce() -> bool) -> bool {
        memo(&self.business, key, compute)
    }

    /// Drop every cached national holiday table.
    pub fn clear_holiday_cache(&self) {
        write(&self.national).clear();
        tracing::debug!("national holiday cache cleared");
    }

    /// Drop every cached table and predicate result.
    pub fn clear_all(&self) {
        write(&self.national).clear();
        write(&self.holiday).clear();
        write(&self.business).clear();
        tracing::debug!("all holiday caches cleared");
    }

    /// Current entry counts.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            national_years: read(&self.national).len(),
            holiday_entries: read(&self.holiday).len(),
            business_entries: read(&self.business).len(),
        }
    }
}

/// Cached national holidays of `year` from the process-wide cache.
pub fn cached_national_holidays(year: i32) -> Result<Arc<[NationalHoliday]>> {
    HolidayCache::global().national_holidays(year)
}

/// Clear the national holiday table of the process-wide cache.
pub fn clear_holiday_cache() {
    HolidayCache::global().clear_holiday_cache();
}

/// Clear every table of the process-wide cache.
pub fn clear_all_caches() {
    HolidayCache::global().clear_all();
}

fn memo<K: Eq + Hash>(map: &RwLock<HashMap<K, bool>>, key: K, compute: impl FnOnce() -> bool) -> bool {
    if let Some(&hit) = read(map).get(&key) {
        return hit;
    }
    let value = compute();
    write(map).insert(key, value);
    value
}

// Values are pure functions of their keys, so a table left behind by a
// panicking writer is still correct.
fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::national::national_holidays;

    #[test]
    fn cached_equals_fresh() {
        let cache = HolidayCache::new();
        for year in [1950, 2024, 2025, 2100] {
            let fresh = national_holidays(year).unwrap();
            assert_eq!(&cache.national_holidays(year).unwrap()[..], &fresh[..]);
            // second call is a hit
            assert_eq!(&cache.national_holidays(year).unwrap()[..], &fresh[..]);
        }
        assert_eq!(cache.stats().national_years, 4);

        cache.clear_holiday_cache();
        assert_eq!(cache.stats().national_years, 0);
        assert_eq!(
            &cache.national_holidays(2024).unwrap()[..],
            &national_holidays(2024).unwrap()[..]
        );
    }

    #[test]
    fn memo_computes_once() {
        let cache = HolidayCache::new();
        let cfg = BusinessConfig::default();
        let key = PredicateKey::new(Date::from_ymd(2024, 1, 1).unwrap(), &cfg);
        let mut calls = 0;
        assert!(cache.holiday_flag(key, || {
            calls += 1;
            true
        }));
        assert!(cache.holiday_flag(key, || {
            calls += 1;
            false
        }));
        assert_eq!(calls, 1);
        assert_eq!(cache.stats().holiday_entries, 1);

        cache.clear_all();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn keys_distinguish_include_optional() {
        let cfg = BusinessConfig::default();
        let d = Date::from_ymd(2024, 10, 28).unwrap();
        assert_ne!(
            PredicateKey::new(d, &cfg),
            PredicateKey::new(d, &cfg.with_include_optional(true))
        );
    }

    #[test]
    fn keys_distinguish_separately_built_tables() {
        use crate::regional::{HolidayScope, RegionalHoliday, RegionalTable};
        let d = Date::from_ymd(2024, 3, 19).unwrap();
        let build = || {
            let mut t = RegionalTable::new();
            t.insert(2024, vec![RegionalHoliday::new(d, "São José", HolidayScope::City, false)]);
            BusinessConfig::default().with_regional_table(t).unwrap()
        };
        let (a, b) = (build(), build());
        assert_ne!(PredicateKey::new(d, &a), PredicateKey::new(d, &b));
        assert_eq!(
            PredicateKey::new(d, &a),
            PredicateKey::new(d, &a.with_timezone("UTC").unwrap())
        );
    }

    #[test]
    fn concurrent_population_converges() {
        let cache = Arc::new(HolidayCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    (2000..2030)
                        .map(|y| cache.national_holidays(y).unwrap().len())
                        .sum::<usize>()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 30 * 12);
        }
        assert_eq!(cache.stats().national_years, 30);
        for y in 2000..2030 {
            assert_eq!(
                &cache.national_holidays(y).unwrap()[..],
                &national_holidays(y).unwrap()[..]
            );
        }
    }

    #[test]
    fn rejects_out_of_range_year() {
        assert!(HolidayCache::new().national_holidays(0).is_err());
    }
}
