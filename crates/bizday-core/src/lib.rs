//! # bizday-core
//!
//! Error definitions shared by every crate in the bizday workspace.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `ensure!` macro.
pub mod errors;

pub use errors::{Error, Result};
