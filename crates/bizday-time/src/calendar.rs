//! `Calendar` trait.
//!
//! A calendar knows which dates are holidays; the business-day predicate,
//! adjustment and business-day arithmetic are built on that by the trait's
//! provided methods.  Walking off either end of the supported date
//! range is reported as an error rather than a panic.

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use crate::national::is_national_holiday;
use bizday_core::errors::Result;

/// A business-day calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Return `true` if `date` is a holiday in this calendar.  Weekends are
    /// not holidays unless a holiday falls on them.
    fn is_holiday(&self, date: Date) -> bool;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Return `true` if `date` is a weekend day.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Return `true` if `date` is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> Result<bool> {
        Ok(self.is_business_day(date) && self.end_of_month(date)? == date)
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Result<Date> {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => {
                let mut d = date;
                while !self.is_business_day(d) {
                    d = d.succ()?;
                }
                Ok(d)
            }
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.adjust(date, BusinessDayConvention::Following)?;
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Preceding)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::Preceding => {
                let mut d = date;
                while !self.is_business_day(d) {
                    d = d.pred()?;
                }
                Ok(d)
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.adjust(date, BusinessDayConvention::Preceding)?;
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Following)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::Nearest => {
                if self.is_business_day(date) {
                    return Ok(date);
                }
                let fwd = self.adjust(date, BusinessDayConvention::Following);
                let bwd = self.adjust(date, BusinessDayConvention::Preceding);
                match (fwd, bwd) {
                    (Ok(f), Ok(b)) if date - b < f - date => Ok(b),
                    (Ok(f), _) => Ok(f),
                    (Err(_), b) => b,
                }
            }
        }
    }

    /// Move `n` business days away from `date` (backward when `n < 0`).
    ///
    /// `n == 0` returns `date` unchanged, business day or not.  Otherwise
    /// the result is always a business day.
    fn advance_business_days(&self, date: Date, n: i32) -> Result<Date> {
        let mut d = date;
        let mut remaining = n.unsigned_abs();
        while remaining > 0 {
            d = if n > 0 { d.succ()? } else { d.pred()? };
            if self.is_business_day(d) {
                remaining -= 1;
            }
        }
        Ok(d)
    }

    /// Count the business days in the inclusive range between `d1` and `d2`,
    /// in either order.
    fn business_days_in_range(&self, d1: Date, d2: Date) -> u32 {
        let (start, end) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        start
            .days_through(end)
            .filter(|&d| self.is_business_day(d))
            .count() as u32
    }

    /// Every business day in the inclusive range `[from, to]`.
    fn business_day_list(&self, from: Date, to: Date) -> Vec<Date> {
        from.days_through(to)
            .filter(|&d| self.is_business_day(d))
            .collect()
    }
}

/// Weekends plus the twelve national holidays, with no regional overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct NationalCalendar;

impl Calendar for NationalCalendar {
    fn name(&self) -> &str {
        "Brazil (national)"
    }

    fn is_holiday(&self, date: Date) -> bool {
        is_national_holiday(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn national_predicates() {
        let cal = NationalCalendar;
        assert!(cal.is_holiday(date(2024, 1, 1)));
        assert!(!cal.is_business_day(date(2024, 1, 1)));
        // 2024-01-06 is a Saturday: weekend, not a holiday
        assert!(!cal.is_holiday(date(2024, 1, 6)));
        assert!(!cal.is_business_day(date(2024, 1, 6)));
        assert!(cal.is_business_day(date(2024, 1, 2)));
        // Carnaval 2024 is a Tuesday
        assert!(cal.is_holiday(date(2024, 2, 13)));
    }

    #[test]
    fn adjust_following_and_preceding() {
        let cal = NationalCalendar;
        let carnaval = date(2024, 2, 13);
        assert_eq!(cal.adjust(carnaval, BusinessDayConvention::Following).unwrap(), date(2024, 2, 14));
        assert_eq!(cal.adjust(carnaval, BusinessDayConvention::Preceding).unwrap(), date(2024, 2, 12));
        assert_eq!(cal.adjust(carnaval, BusinessDayConvention::Unadjusted).unwrap(), carnaval);
        assert_eq!(
            cal.adjust(carnaval, BusinessDayConvention::ModifiedFollowing).unwrap(),
            date(2024, 2, 14)
        );
    }

    #[test]
    fn adjust_modified_following_stays_in_month() {
        let cal = NationalCalendar;
        // Good Friday 2024 is 2024-03-29; Following lands on Monday 1 April.
        let good_friday = date(2024, 3, 29);
        assert_eq!(cal.adjust(good_friday, BusinessDayConvention::Following).unwrap(), date(2024, 4, 1));
        assert_eq!(
            cal.adjust(good_friday, BusinessDayConvention::ModifiedFollowing).unwrap(),
            date(2024, 3, 28)
        );
        // 2024-06-01 is a Saturday; Preceding would cross into May.
        assert_eq!(
            cal.adjust(date(2024, 6, 1), BusinessDayConvention::ModifiedPreceding).unwrap(),
            date(2024, 6, 3)
        );
    }

    #[test]
    fn adjust_nearest() {
        let cal = NationalCalendar;
        // Saturday is closer to Friday, Sunday closer to Monday.
        assert_eq!(
            cal.adjust(date(2024, 1, 6), BusinessDayConvention::Nearest).unwrap(),
            date(2024, 1, 5)
        );
        assert_eq!(
            cal.adjust(date(2024, 1, 7), BusinessDayConvention::Nearest).unwrap(),
            date(2024, 1, 8)
        );
        // Carnaval: Monday and Wednesday tie, forward wins.
        assert_eq!(
            cal.adjust(date(2024, 2, 13), BusinessDayConvention::Nearest).unwrap(),
            date(2024, 2, 14)
        );
        assert_eq!(
            cal.adjust(date(2024, 3, 29), BusinessDayConvention::Nearest).unwrap(),
            date(2024, 3, 28)
        );
    }

    #[test]
    fn advance_and_count() {
        let cal = NationalCalendar;
        let fri = date(2024, 2, 9);
        assert_eq!(cal.advance_business_days(fri, 1).unwrap(), date(2024, 2, 12));
        assert_eq!(cal.advance_business_days(fri, 2).unwrap(), date(2024, 2, 14));
        assert_eq!(cal.advance_business_days(date(2024, 2, 14), -2).unwrap(), fri);
        assert_eq!(cal.advance_business_days(date(2024, 2, 13), 0).unwrap(), date(2024, 2, 13));
        // Mon..Fri of Carnaval week, inclusive, either order
        assert_eq!(cal.business_days_in_range(date(2024, 2, 12), date(2024, 2, 16)), 4);
        assert_eq!(cal.business_days_in_range(date(2024, 2, 16), date(2024, 2, 12)), 4);
        assert_eq!(
            cal.business_day_list(date(2024, 2, 9), date(2024, 2, 14)),
            [date(2024, 2, 9), date(2024, 2, 12), date(2024, 2, 14)]
        );
    }

    #[test]
    fn end_of_month() {
        let cal = NationalCalendar;
        assert_eq!(cal.end_of_month(date(2024, 8, 10)).unwrap(), date(2024, 8, 30));
        // March 2024 ends on a weekend preceded by Good Friday.
        assert_eq!(cal.end_of_month(date(2024, 3, 10)).unwrap(), date(2024, 3, 28));
        assert!(cal.is_end_of_month(date(2024, 3, 28)).unwrap());
        assert!(!cal.is_end_of_month(date(2024, 3, 29)).unwrap());
    }

    #[test]
    fn walking_off_the_range_is_an_error() {
        let cal = NationalCalendar;
        // 9999-12-31 is a Friday.
        assert!(cal.advance_business_days(Date::MAX, 1).is_err());
    }
}
