//! Testing utilities and helpers
//!
//! Compiled for this crate's own tests and, through the `test-utils`
//! feature, for downstream test suites.
//!
//! - **[`time`]**: [`MockClock`], a clock that only moves when told to

pub mod time;

pub use time::MockClock;
