//! Time utilities and abstractions
//!
//! - **[`clock`]**: The [`Clock`] trait and the real [`SystemClock`]
//! - **[`format`]**: Request timestamp formatting for the `x-amz-date` header
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use spgate_common::time::format_amz_date;
//!
//! let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 5).unwrap();
//! assert_eq!(format_amz_date(at), "20240115T083005Z");
//! ```

pub mod clock;
pub mod format;

pub use clock::{Clock, SystemClock};
pub use format::format_amz_date;
