//! Civil-day extraction.
//!
//! Holiday tables key on calendar days, so an instant must be mapped to the
//! day it falls on *in the configured timezone* before any lookup.  The
//! mapping goes through `chrono-tz` and never through a UTC string: an
//! instant at 23:30 in São Paulo is still that day, even though it is
//! already the next day in UTC.

use crate::config::BusinessConfig;
use crate::date::Date;
use bizday_core::errors::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Calendar day on which `instant` falls in `config`'s timezone.
pub fn civil_date<T: TimeZone>(instant: &DateTime<T>, config: &BusinessConfig) -> Result<Date> {
    let local = instant.with_timezone(&config.tz());
    Date::try_from(local.date_naive())
}

/// Calendar day for a Unix timestamp in milliseconds, the representation
/// used by browser `Date` objects.
pub fn civil_date_from_millis(millis: i64, config: &BusinessConfig) -> Result<Date> {
    let instant = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| Error::InvalidDate(format!("timestamp {millis} ms is out of range")))?;
    civil_date(&instant, config)
}

/// Today's calendar day in `config`'s timezone.
pub fn civil_today(config: &BusinessConfig) -> Result<Date> {
    civil_date(&Utc::now(), config)
}
