//! Business-day convention.

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BusinessDayConvention {
    /// Choose the first business day after the given holiday.
    #[default]
    Following,
    /// Choose the first business day after the given holiday unless it belongs
    /// to a different month; in that case choose the first business day before
    /// the holiday.
    ModifiedFollowing,
    /// Choose the first business day before the given holiday.
    Preceding,
    /// Choose the first business day before the given holiday unless it belongs
    /// to a different month; in that case choose the first business day after
    /// the holiday.
    ModifiedPreceding,
    /// Do not adjust (keep the original date).
    Unadjusted,
    /// Choose the nearest business day.  In case of a tie, use the following
    /// convention.
    Nearest,
}

/// Direction in which [`crate::BusinessDays::clamp_to_business_day`] walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Forward to the next business day.
    #[default]
    Next,
    /// Backward to the previous business day.
    Previous,
}

impl From<Direction> for BusinessDayConvention {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Next => BusinessDayConvention::Following,
            Direction::Previous => BusinessDayConvention::Preceding,
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Nearest => "Nearest",
        };
        write!(f, "{s}")
    }
}
