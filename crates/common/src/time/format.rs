//! Request timestamp formatting.

use chrono::{DateTime, Utc};

/// ISO-8601 basic format: no separators, no fractional seconds, UTC designator.
const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Format a UTC instant for the `x-amz-date` request header.
///
/// Sub-second precision is truncated, never rounded.
#[must_use]
pub fn format_amz_date(at: DateTime<Utc>) -> String {
    at.format(AMZ_DATE_FORMAT).to_string()
}
