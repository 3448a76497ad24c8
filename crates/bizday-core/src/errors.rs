//! Error types for bizday.
//!
//! Every fallible operation in the workspace returns [`Result`] with the
//! single [`Error`] enum defined here.  The [`ensure!`](crate::ensure) macro
//! keeps precondition checks to one line.

use thiserror::Error;

/// The top-level error type used throughout bizday.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A calendar date that does not exist, could not be parsed, or fell
    /// outside the supported range during arithmetic.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Year outside the supported range.
    #[error("year {year} out of range [{min}, {max}]")]
    YearOutOfRange {
        /// The offending year.
        year: i32,
        /// Smallest supported year.
        min: i32,
        /// Largest supported year.
        max: i32,
    },

    /// Timezone name not present in the IANA database.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Malformed business-day configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout bizday.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bizday_core::{ensure, errors::Error};
/// fn positive(x: i32) -> bizday_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
