//! Brazilian national holidays.
//!
//! Eight holidays fall on the same day every year; four move with Easter
//! (see [`crate::easter`]).  Together they form the twelve-entry table
//! returned by [`national_holidays`].

use crate::date::{check_year, Date};
use crate::easter::movable_unchecked;
use bizday_core::errors::Result;
use serde::Serialize;

/// Whether a holiday sits on a fixed month/day or moves with Easter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    /// Same month and day every year.
    Fixed,
    /// Derived from the date of Easter.
    Movable,
}

/// A national holiday on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NationalHoliday {
    /// Calendar day of the holiday.
    #[serde(rename = "dateISO")]
    pub date: Date,
    /// Official name.
    pub name: &'static str,
    /// Fixed or movable.
    pub kind: HolidayKind,
}

impl NationalHoliday {
    pub(crate) fn new(date: Date, name: &'static str, kind: HolidayKind) -> Self {
        Self { date, name, kind }
    }
}

/// Fixed national holidays as `(name, month, day)`.
pub const FIXED_HOLIDAYS: [(&str, u32, u32); 8] = [
    ("Confraternização Universal", 1, 1),
    ("Tiradentes", 4, 21),
    ("Dia do Trabalho", 5, 1),
    ("Independência do Brasil", 9, 7),
    ("Nossa Senhora Aparecida", 10, 12),
    ("Finados", 11, 2),
    ("Proclamação da República", 11, 15),
    ("Natal", 12, 25),
];

/// Number of national holidays in every year.
pub const NATIONAL_HOLIDAYS_PER_YEAR: usize = FIXED_HOLIDAYS.len() + 4;

/// All twelve national holidays of `year`, sorted by date.
///
/// # Errors
/// Returns an error if `year` is outside the supported range.
pub fn national_holidays(year: i32) -> Result<Vec<NationalHoliday>> {
    check_year(year)?;
    Ok(national_unchecked(year))
}

/// Name of the national holiday falling on `date`, if any.
pub fn holiday_name(date: Date) -> Option<&'static str> {
    national_unchecked(date.year())
        .into_iter()
        .find(|h| h.date == date)
        .map(|h| h.name)
}

/// Return `true` if `date` is a national holiday.
pub fn is_national_holiday(date: Date) -> bool {
    holiday_name(date).is_some()
}

/// Build the table for a year already known to be in range.
pub(crate) fn national_unchecked(year: i32) -> Vec<NationalHoliday> {
    let mut holidays: Vec<NationalHoliday> = FIXED_HOLIDAYS
        .iter()
        .map(|&(name, m, d)| {
            NationalHoliday::new(Date::from_ymd_unchecked(year, m, d), name, HolidayKind::Fixed)
        })
        .collect();
    holidays.extend(movable_unchecked(year));
    holidays.sort_by_key(|h| h.date);
    holidays
}
