//! # bizday
//!
//! Brazilian business-day calendar engine.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates.  Application code should depend on this crate rather
//! than on the individual `bizday-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use bizday::time::{BusinessConfig, BusinessDays, Date};
//!
//! let engine = BusinessDays::global();
//! let cfg = BusinessConfig::shared_default();
//! let new_year = Date::from_ymd(2024, 1, 1).unwrap();
//! assert!(!engine.is_business_day(new_year, cfg));
//! assert_eq!(
//!     engine.next_business_day(new_year, cfg).unwrap(),
//!     Date::from_ymd(2024, 1, 2).unwrap()
//! );
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions.
pub use bizday_core as core;

/// Dates, holiday tables, configuration, and the business-day engine.
pub use bizday_time as time;

pub use bizday_core::{Error, Result};
