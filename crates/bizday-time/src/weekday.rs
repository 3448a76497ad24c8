//! `Weekday`: day-of-week enum.

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7) following ISO 8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// Return `true` if this is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Return `true` if this is Monday–Friday.
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Return the ISO ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Return the Sunday-based index (0 = Sunday … 6 = Saturday) used by
    /// browser date APIs.
    pub fn sunday_index(&self) -> u8 {
        self.ordinal() % 7
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    #[test]
    fn sunday_index_convention() {
        assert_eq!(Weekday::Sunday.sunday_index(), 0);
        assert_eq!(Weekday::Monday.sunday_index(), 1);
        assert_eq!(Weekday::Saturday.sunday_index(), 6);
    }

    #[test]
    fn weekend_split() {
        // 2024-01-01 is a Monday.
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let week: Vec<Weekday> = start
            .days_through(Date::from_ymd(2024, 1, 7).unwrap())
            .map(|d| d.weekday())
            .collect();
        assert_eq!(week.iter().map(Weekday::ordinal).collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
        let weekend: Vec<_> = week.into_iter().filter(Weekday::is_weekend).collect();
        assert_eq!(weekend, [Weekday::Saturday, Weekday::Sunday]);
    }
}
