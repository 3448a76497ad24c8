//! `Date` type.
//!
//! Dates are stored as a serial number of days in the proleptic Gregorian
//! calendar.
//!
//! # Serial number convention
//! * Serial 1 = January 1, 0001 (the same day count as
//!   `chrono::Datelike::num_days_from_ce`).
//! * The valid date range is 0001-01-01 to 9999-12-31, so that every date
//!   has a four-digit `YYYY-MM-DD` form.
//!
//! A `Date` carries no time of day and no timezone: it *is* the civil
//! calendar day that holiday tables key on.  Instants are turned into a
//! `Date` through [`crate::civil::civil_date`].

use crate::weekday::Weekday;
use bizday_core::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar day represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

/// Smallest supported year.
pub const MIN_YEAR: i32 = 1;

/// Largest supported year.
pub const MAX_YEAR: i32 = 9999;

// Offset between the Unix-epoch day count of `days_from_civil` and our
// serial numbers (1970-01-01 is serial 719 163).
const UNIX_EPOCH_SERIAL: i64 = 719_163;

impl Date {
    /// Minimum valid date: January 1, 0001.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 9999.
    pub const MAX: Date = Date(3_652_059);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::InvalidDate(format!(
                "serial {serial} out of range [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        check_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidDate(format!(
                "month {month} out of range [1, 12]"
            )));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::InvalidDate(format!(
                "day {day} out of range [1, {days_in}] for {year:04}-{month:02}"
            )));
        }
        Ok(Self::from_ymd_unchecked(year, month, day))
    }

    /// Build a date whose components are already known to be valid.
    pub(crate) fn from_ymd_unchecked(year: i32, month: u32, day: u32) -> Self {
        debug_assert!((MIN_YEAR..=MAX_YEAR).contains(&year));
        Date((days_from_civil(year, month, day) + UNIX_EPOCH_SERIAL) as i32)
    }

    /// Parse an ISO calendar date of the form `YYYY-MM-DD`.
    pub fn parse_iso(s: &str) -> Result<Self> {
        let bad = || Error::InvalidDate(format!("{s:?} is not a YYYY-MM-DD date"));
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(bad());
        }
        let digits = |range: std::ops::Range<usize>| -> Result<u32> {
            let part = &s[range];
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
            part.parse::<u32>().map_err(|_| bad())
        };
        let year = digits(0..4)? as i32;
        let month = digits(5..7)?;
        let day = digits(8..10)?;
        Self::from_ymd(year, month, day)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1–9999).
    pub fn year(&self) -> i32 {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u32 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u32 {
        self.ymd().2
    }

    /// Return `(year, month, day)` in one decomposition.
    pub fn ymd(&self) -> (i32, u32, u32) {
        civil_from_days(self.0 as i64 - UNIX_EPOCH_SERIAL)
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u32 {
        let (y, _, _) = self.ymd();
        (self.0 - Self::from_ymd_unchecked(y, 1, 1).0 + 1) as u32
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // 0001-01-01 (serial 1) was a Monday.
        match (self.0 - 1).rem_euclid(7) {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    /// Format as `YYYY-MM-DD`, the key used by every holiday table.
    pub fn to_iso(&self) -> String {
        let (y, m, d) = self.ymd();
        format!("{y:04}-{m:02}-{d:02}")
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` calendar days.  Fails if the result leaves the
    /// supported range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        match self.0.checked_add(n) {
            Some(serial) if (Self::MIN.0..=Self::MAX.0).contains(&serial) => Ok(Date(serial)),
            _ => Err(Error::InvalidDate(format!(
                "{self} {} {} days leaves the supported range",
                if n < 0 { "minus" } else { "plus" },
                n.unsigned_abs()
            ))),
        }
    }

    /// The following calendar day.
    pub fn succ(self) -> Result<Self> {
        self.add_days(1)
    }

    /// The preceding calendar day.
    pub fn pred(self) -> Result<Self> {
        self.add_days(-1)
    }

    /// Number of calendar days from `self` to `other` (positive if
    /// `other > self`).
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// First day of the month containing this date.
    pub fn start_of_month(self) -> Self {
        let (y, m, _) = self.ymd();
        Self::from_ymd_unchecked(y, m, 1)
    }

    /// Last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = self.ymd();
        Self::from_ymd_unchecked(y, m, days_in_month(y, m))
    }

    /// Every calendar day from `self` through `end`, both inclusive.
    /// Empty when `end < self`.
    pub fn days_through(self, end: Date) -> impl DoubleEndedIterator<Item = Date> {
        (self.0..=end.0).map(Date)
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        let (y, m, d) = date.ymd();
        // Every `Date` lies inside chrono's representable range.
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    fn try_from(value: NaiveDate) -> Result<Self> {
        Date::from_ymd(value.year(), value.month(), value.day())
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse_iso(s)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::parse_iso(&s).map_err(serde::de::Error::custom)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Fail unless `year` is inside the supported range.
pub(crate) fn check_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        });
    }
    Ok(())
}

/// Whether a given year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!((1..=12).contains(&month));
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date (H. Hinnant's
/// `days_from_civil`).
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(if month <= 2 { year - 1 } else { year });
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let mp = (month as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = (yoe + era * 400) as i32 + i32::from(m <= 2);
    (y, m, d)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
