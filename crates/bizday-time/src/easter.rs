//! Easter Sunday and the Brazilian holidays that move with it.

use crate::date::{check_year, Date};
use crate::national::{HolidayKind, NationalHoliday};
use bizday_core::errors::Result;

/// Movable holidays as `(name, offset in days from Easter Sunday)`.
pub const MOVABLE_OFFSETS: [(&str, i32); 4] = [
    ("Carnaval", -47),
    ("Sexta-feira Santa", -2),
    ("Páscoa", 0),
    ("Corpus Christi", 60),
];

/// Easter Sunday of `year` in the Gregorian calendar.
///
/// Meeus/Jones/Butcher algorithm.
///
/// # Errors
/// Returns [`Error::YearOutOfRange`](bizday_core::Error::YearOutOfRange) for
/// years outside the supported date range.
pub fn easter_date(year: i32) -> Result<Date> {
    check_year(year)?;
    Ok(easter_unchecked(year))
}

/// The four movable holidays of `year`, in chronological order.
pub fn movable_holidays(year: i32) -> Result<Vec<NationalHoliday>> {
    check_year(year)?;
    Ok(movable_unchecked(year))
}

pub(crate) fn easter_unchecked(year: i32) -> Date {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd_unchecked(year, month as u32, day as u32)
}

pub(crate) fn movable_unchecked(year: i32) -> Vec<NationalHoliday> {
    // Easter falls between March 22 and April 25, so every offset stays
    // inside `year` (Carnaval >= Feb 3, Corpus Christi <= Jun 24).
    let easter = easter_unchecked(year).serial();
    MOVABLE_OFFSETS
        .iter()
        .filter_map(|&(name, offset)| {
            Date::from_serial(easter + offset)
                .ok()
                .map(|date| NationalHoliday::new(date, name, HolidayKind::Movable))
        })
        .collect()
}
